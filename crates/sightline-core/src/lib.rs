//! Core types and definitions for SIGHTLINE camera coverage planning.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates, camera settings and records, commands, constants and
//! configuration errors. It has no dependency on terrain data or I/O.

pub mod camera;
pub mod commands;
pub mod constants;
pub mod error;
pub mod types;

pub use camera::Camera;
pub use commands::CameraCommand;
pub use error::ConfigError;
pub use types::{CameraSettings, GeoPoint, SettingsOverride};
