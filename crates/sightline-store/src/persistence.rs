//! Camera list persistence under the fixed `camera-storage` key.
//!
//! Only the camera records are written. Settings and polygons are trusted
//! as stored until the next edit recomputes them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sightline_core::camera::Camera;
use sightline_core::constants::STORAGE_KEY;
use tracing::info;

use crate::error::PersistError;
use crate::store::CameraStore;

#[derive(Serialize)]
struct PersistedRef<'a> {
    cameras: &'a [Camera],
}

#[derive(Deserialize)]
struct Persisted {
    #[serde(default)]
    cameras: Vec<Camera>,
}

/// File holding the camera list inside `dir`.
pub fn storage_path(dir: &Path) -> PathBuf {
    dir.join(format!("{STORAGE_KEY}.json"))
}

/// Write the camera list, replacing any previous file in one rename.
pub fn save_store(dir: &Path, store: &CameraStore) -> Result<(), PersistError> {
    fs::create_dir_all(dir)?;
    let path = storage_path(dir);
    let tmp = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(&PersistedRef {
        cameras: store.cameras(),
    })?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)?;

    info!(path = %path.display(), cameras = store.len(), "camera list saved");
    Ok(())
}

/// Read the camera list. A missing file is an empty list.
pub fn load_store(dir: &Path) -> Result<CameraStore, PersistError> {
    let path = storage_path(dir);
    if !path.exists() {
        return Ok(CameraStore::new());
    }

    let json = fs::read_to_string(&path)?;
    let persisted: Persisted = serde_json::from_str(&json)?;

    info!(path = %path.display(), cameras = persisted.cameras.len(), "camera list loaded");
    Ok(CameraStore::from_cameras(persisted.cameras))
}
