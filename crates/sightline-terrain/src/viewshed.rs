//! Camera visibility polygon with terrain occlusion.
//!
//! Horizon scan: one ray per swept bearing, stepped outward at fixed
//! distance increments. A sample is visible only if its elevation angle
//! from the camera eye exceeds every closer sample's angle on the same ray.
//! Angles use a local flat-earth approximation (no curvature or refraction).

use sightline_core::constants::{MAX_HFOV_DEG, MIN_HFOV_DEG, PREVIEW_AZIMUTH_STEP_DEG};
use sightline_core::error::ConfigError;
use sightline_core::types::{CameraSettings, GeoPoint};
use tracing::debug;

use crate::geodesy::{destination_point, normalize_bearing};
use crate::source::{ElevationSource, TerrainError};

/// Why a visibility polygon could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ViewshedError {
    #[error("invalid camera settings: {0}")]
    InvalidSettings(#[from] ConfigError),

    #[error("terrain query failed: {0}")]
    Terrain(#[from] TerrainError),
}

/// Farthest visible point along every swept bearing, in sweep order.
///
/// Bearings whose very first sample has no terrain data contribute nothing,
/// so the result may hold fewer points than `settings.bearing_count()`.
/// Any source error aborts the computation; no partial polygon is returned.
pub fn compute_visibility_polygon<S>(
    camera: GeoPoint,
    settings: &CameraSettings,
    terrain: &S,
) -> Result<Vec<GeoPoint>, ViewshedError>
where
    S: ElevationSource + ?Sized,
{
    settings.validate()?;

    let origin_elevation = terrain.elevation_at(camera)?.unwrap_or(0.0);
    let eye_height = origin_elevation + settings.camera_height;

    let mut polygon = Vec::with_capacity(settings.bearing_count());
    for bearing in settings.sweep_bearings() {
        let bearing = normalize_bearing(bearing);
        if let Some(point) = farthest_visible(camera, eye_height, bearing, settings, terrain)? {
            polygon.push(point);
        }
    }

    debug!(
        lat = camera.latitude,
        lng = camera.longitude,
        eye_height,
        bearings = settings.bearing_count(),
        visible = polygon.len(),
        "visibility polygon computed"
    );

    Ok(polygon)
}

/// March one ray and return its farthest sample not shadowed by closer terrain.
fn farthest_visible<S>(
    camera: GeoPoint,
    eye_height: f64,
    bearing: f64,
    settings: &CameraSettings,
    terrain: &S,
) -> Result<Option<GeoPoint>, TerrainError>
where
    S: ElevationSource + ?Sized,
{
    let mut max_angle = f64::NEG_INFINITY;
    let mut last_visible = None;

    for distance in settings.ray_distances() {
        let sample = destination_point(camera, distance, bearing);

        // Outside terrain coverage: nothing farther on this bearing counts.
        let Some(elevation) = terrain.elevation_at(sample)? else {
            break;
        };

        let angle = (elevation - eye_height).atan2(distance);
        if angle > max_angle {
            max_angle = angle;
            last_visible = Some(sample);
        }
    }

    Ok(last_visible)
}

/// Unoccluded placement preview: points at `max_range` every 2° across the field of view.
///
/// Does not touch terrain; used to show the intended sweep before a camera is placed.
/// The field of view is clamped to the accepted range.
pub fn coverage_cone(camera: GeoPoint, settings: &CameraSettings) -> Vec<GeoPoint> {
    let preview = CameraSettings {
        horizontal_fov: settings.horizontal_fov.clamp(MIN_HFOV_DEG, MAX_HFOV_DEG),
        azimuth_step: PREVIEW_AZIMUTH_STEP_DEG,
        ..*settings
    };
    preview
        .sweep_bearings()
        .map(|bearing| destination_point(camera, settings.max_range, normalize_bearing(bearing)))
        .collect()
}

/// End of the heading arrow: `max_range` along the camera heading.
pub fn heading_marker(camera: GeoPoint, settings: &CameraSettings) -> GeoPoint {
    destination_point(camera, settings.max_range, normalize_bearing(settings.heading))
}
