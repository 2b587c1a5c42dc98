//! Error types for camera store mutations, persistence and device sync.

use std::io;

use sightline_core::error::ConfigError;
use sightline_terrain::viewshed::ViewshedError;

/// A store mutation was refused. The store is unchanged when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no camera with id {0}")]
    UnknownCamera(String),

    #[error("invalid camera position: {0}")]
    InvalidPosition(#[source] ConfigError),

    #[error(transparent)]
    Viewshed(#[from] ViewshedError),
}

/// Reading or writing the persisted camera list failed.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed camera storage: {0}")]
    Json(#[from] serde_json::Error),
}

/// One device could not be synced.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{url} did not report numeric lat/lng")]
    MissingCoordinates { url: String },

    #[error("cannot read device list: {0}")]
    DeviceList(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
