//! Owned camera list with atomic create/update/remove operations.

use sightline_core::camera::Camera;
use sightline_core::commands::CameraCommand;
use sightline_core::constants::CAMERA_ID_PREFIX;
use sightline_core::types::{CameraSettings, GeoPoint, SettingsOverride};
use sightline_terrain::geodesy::normalize_bearing;
use sightline_terrain::source::ElevationSource;
use sightline_terrain::viewshed::compute_visibility_polygon;
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;

/// What an applied command changed.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A camera was created with this id.
    Placed(String),
    /// The camera with this id was replaced by a recomputed record.
    Updated(String),
    /// This camera was removed.
    Removed(Camera),
    /// This many cameras were removed.
    Cleared(usize),
}

/// The camera list.
///
/// Settings and polygon are only ever replaced together: every operation
/// computes the new polygon first and touches the list only on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraStore {
    cameras: Vec<Camera>,
}

impl CameraStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt previously persisted records as-is (polygons are not recomputed).
    pub fn from_cameras(cameras: Vec<Camera>) -> Self {
        Self { cameras }
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn into_cameras(self) -> Vec<Camera> {
        self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    fn index_of(&self, id: &str) -> Result<usize, StoreError> {
        self.cameras
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::UnknownCamera(id.to_string()))
    }

    /// Place a camera. Unspecified settings fall back to the defaults.
    pub fn create<S>(
        &mut self,
        name: impl Into<String>,
        position: GeoPoint,
        overrides: &SettingsOverride,
        terrain: &S,
    ) -> Result<&Camera, StoreError>
    where
        S: ElevationSource + ?Sized,
    {
        position.validate().map_err(StoreError::InvalidPosition)?;

        let settings = normalized(CameraSettings::default().with_overrides(overrides));
        let polygon = compute_visibility_polygon(position, &settings, terrain)?;

        let camera = Camera {
            id: new_camera_id(),
            name: name.into(),
            position,
            settings,
            visibility_polygon: polygon,
        };
        info!(
            id = %camera.id,
            name = %camera.name,
            heading = settings.heading,
            points = camera.visibility_polygon.len(),
            "camera placed"
        );

        let idx = self.cameras.len();
        self.cameras.push(camera);
        Ok(&self.cameras[idx])
    }

    /// Merge `overrides` into a camera's settings and recompute its polygon.
    pub fn update_settings<S>(
        &mut self,
        id: &str,
        overrides: &SettingsOverride,
        terrain: &S,
    ) -> Result<&Camera, StoreError>
    where
        S: ElevationSource + ?Sized,
    {
        let idx = self.index_of(id)?;
        let current = &self.cameras[idx];
        let settings = normalized(current.settings.with_overrides(overrides));
        let polygon = compute_visibility_polygon(current.position, &settings, terrain)?;

        let camera = &mut self.cameras[idx];
        camera.settings = settings;
        camera.visibility_polygon = polygon;
        info!(
            id = %camera.id,
            heading = settings.heading,
            hfov = settings.horizontal_fov,
            max_range = settings.max_range,
            points = camera.visibility_polygon.len(),
            "camera updated"
        );
        Ok(camera)
    }

    /// Point a camera at `heading` degrees.
    pub fn set_heading<S>(
        &mut self,
        id: &str,
        heading: f64,
        terrain: &S,
    ) -> Result<&Camera, StoreError>
    where
        S: ElevationSource + ?Sized,
    {
        self.update_settings(id, &SettingsOverride::heading_only(heading), terrain)
    }

    /// Turn a camera by `delta` degrees (positive = clockwise).
    pub fn rotate<S>(&mut self, id: &str, delta: f64, terrain: &S) -> Result<&Camera, StoreError>
    where
        S: ElevationSource + ?Sized,
    {
        let heading = self.cameras[self.index_of(id)?].settings.heading + delta;
        self.set_heading(id, heading, terrain)
    }

    /// Change a camera's display name. Settings and polygon are untouched.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<&Camera, StoreError> {
        let idx = self.index_of(id)?;
        let camera = &mut self.cameras[idx];
        camera.name = name.into();
        info!(id = %camera.id, name = %camera.name, "camera renamed");
        Ok(camera)
    }

    /// Remove a camera, keeping the order of the others.
    pub fn remove(&mut self, id: &str) -> Result<Camera, StoreError> {
        let idx = self.index_of(id)?;
        let camera = self.cameras.remove(idx);
        info!(id = %camera.id, name = %camera.name, "camera removed");
        Ok(camera)
    }

    /// Remove every camera; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.cameras.len();
        self.cameras.clear();
        info!(removed = n, "cameras cleared");
        n
    }

    /// Apply an operator command.
    pub fn apply<S>(
        &mut self,
        command: CameraCommand,
        terrain: &S,
    ) -> Result<CommandOutcome, StoreError>
    where
        S: ElevationSource + ?Sized,
    {
        match command {
            CameraCommand::PlaceCamera {
                name,
                position,
                settings,
            } => {
                let camera = self.create(name, position, &settings, terrain)?;
                Ok(CommandOutcome::Placed(camera.id.clone()))
            }
            CameraCommand::UpdateSettings { id, settings } => {
                self.update_settings(&id, &settings, terrain)?;
                Ok(CommandOutcome::Updated(id))
            }
            CameraCommand::RotateCamera { id, delta } => {
                self.rotate(&id, delta, terrain)?;
                Ok(CommandOutcome::Updated(id))
            }
            CameraCommand::RenameCamera { id, name } => {
                self.rename(&id, name)?;
                Ok(CommandOutcome::Updated(id))
            }
            CameraCommand::RemoveCamera { id } => Ok(CommandOutcome::Removed(self.remove(&id)?)),
            CameraCommand::ClearCameras => Ok(CommandOutcome::Cleared(self.clear())),
        }
    }
}

/// Stored headings are always in [0, 360).
fn normalized(settings: CameraSettings) -> CameraSettings {
    CameraSettings {
        heading: normalize_bearing(settings.heading),
        ..settings
    }
}

fn new_camera_id() -> String {
    format!("{CAMERA_ID_PREFIX}{}", Uuid::new_v4())
}
