//! Operator commands sent from a front end to the camera store.
//!
//! Each command is applied atomically: either the whole change lands
//! (settings and polygon together) or the store is left untouched.

use serde::{Deserialize, Serialize};

use crate::types::{GeoPoint, SettingsOverride};

/// All possible camera actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CameraCommand {
    /// Place a new camera; unspecified settings fall back to the defaults.
    PlaceCamera {
        name: String,
        position: GeoPoint,
        #[serde(default)]
        settings: SettingsOverride,
    },
    /// Change any subset of a camera's settings.
    UpdateSettings {
        id: String,
        settings: SettingsOverride,
    },
    /// Turn a camera by `delta` degrees (positive = clockwise).
    RotateCamera { id: String, delta: f64 },
    /// Rename a camera; its polygon is unaffected.
    RenameCamera { id: String, name: String },
    /// Delete a camera.
    RemoveCamera { id: String },
    /// Delete every camera.
    ClearCameras,
}
