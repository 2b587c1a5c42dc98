//! SIGHTLINE camera store.
//!
//! Owns the camera list and is the only place cameras are created,
//! edited or removed. Also persists the list to disk and imports
//! cameras reported by field devices.

pub mod error;
pub mod persistence;
pub mod store;
pub mod sync;

pub use sightline_core as core;

pub use error::{PersistError, StoreError, SyncError};
pub use store::{CameraStore, CommandOutcome};
