//! Fundamental geographic and camera-configuration types.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, Result};

/// Slack applied when counting grid steps, so `60 / 30` yields 2 and not 1.999….
const STEP_EPSILON: f64 = 1e-9;

/// Geographic coordinate in degrees (WGS84 latitude/longitude, spherical use only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<()> {
        finite("latitude", self.latitude)?;
        finite("longitude", self.longitude)?;
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// `[lng, lat]` pair in GeoJSON coordinate order.
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Sweep and ray-march parameters of one camera.
///
/// Field names on the wire match the persisted camera records
/// (`hfov`, `azStep`, `dStep`, `maxRange`, `cameraHeight`, `heading`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Horizontal field of view (degrees).
    #[serde(rename = "hfov")]
    pub horizontal_fov: f64,
    /// Angular step between swept bearings (degrees).
    #[serde(rename = "azStep")]
    pub azimuth_step: f64,
    /// Distance between samples along a ray (meters).
    #[serde(rename = "dStep")]
    pub range_step: f64,
    /// Farthest sample distance (meters).
    #[serde(rename = "maxRange")]
    pub max_range: f64,
    /// Mounting height above the terrain at the camera (meters).
    #[serde(rename = "cameraHeight")]
    pub camera_height: f64,
    /// Center of the sweep (degrees, 0 = North, clockwise).
    pub heading: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            horizontal_fov: DEFAULT_HFOV_DEG,
            azimuth_step: DEFAULT_AZIMUTH_STEP_DEG,
            range_step: DEFAULT_RANGE_STEP_M,
            max_range: DEFAULT_MAX_RANGE_M,
            camera_height: DEFAULT_CAMERA_HEIGHT_M,
            heading: DEFAULT_HEADING_DEG,
        }
    }
}

impl CameraSettings {
    /// Check the settings before any terrain is sampled.
    pub fn validate(&self) -> Result<()> {
        finite("horizontal field of view", self.horizontal_fov)?;
        finite("azimuth step", self.azimuth_step)?;
        finite("range step", self.range_step)?;
        finite("max range", self.max_range)?;
        finite("camera height", self.camera_height)?;
        finite("heading", self.heading)?;

        if !(MIN_HFOV_DEG..=MAX_HFOV_DEG).contains(&self.horizontal_fov) {
            return Err(ConfigError::FovOutOfRange {
                value: self.horizontal_fov,
                min: MIN_HFOV_DEG,
                max: MAX_HFOV_DEG,
            });
        }
        if self.azimuth_step <= 0.0 {
            return Err(ConfigError::NonPositiveStep {
                field: "azimuth step",
                value: self.azimuth_step,
            });
        }
        if self.range_step <= 0.0 {
            return Err(ConfigError::NonPositiveStep {
                field: "range step",
                value: self.range_step,
            });
        }
        if self.max_range < self.range_step {
            return Err(ConfigError::RangeShorterThanStep {
                max_range: self.max_range,
                range_step: self.range_step,
            });
        }
        if self.camera_height < 0.0 {
            return Err(ConfigError::NegativeHeight(self.camera_height));
        }

        let samples = self.bearing_count().saturating_mul(self.samples_per_ray());
        if samples > MAX_SAMPLES_PER_POLYGON {
            return Err(ConfigError::TooManySamples {
                samples,
                limit: MAX_SAMPLES_PER_POLYGON,
            });
        }
        Ok(())
    }

    /// Number of bearings in the sweep, both edges included when they land on the step grid.
    ///
    /// Saturates at `usize::MAX` for degenerate steps; `validate` rejects those.
    pub fn bearing_count(&self) -> usize {
        let steps = (self.horizontal_fov / self.azimuth_step + STEP_EPSILON).floor() as usize;
        steps.saturating_add(1)
    }

    /// Number of samples along each ray (`range_step, 2 * range_step, ..., <= max_range`).
    pub fn samples_per_ray(&self) -> usize {
        (self.max_range / self.range_step + STEP_EPSILON).floor() as usize
    }

    /// Raw sweep bearings from the left edge of the field of view, clockwise.
    ///
    /// Values are not wrapped; callers normalize before use.
    pub fn sweep_bearings(&self) -> impl Iterator<Item = f64> {
        let start = self.heading - self.horizontal_fov / 2.0;
        let step = self.azimuth_step;
        (0..self.bearing_count()).map(move |i| start + i as f64 * step)
    }

    /// Sample distances along one ray, nearest first.
    pub fn ray_distances(&self) -> impl Iterator<Item = f64> {
        let step = self.range_step;
        (1..=self.samples_per_ray()).map(move |k| k as f64 * step)
    }

    /// Copy of these settings with every field the override specifies replaced.
    pub fn with_overrides(&self, overrides: &SettingsOverride) -> Self {
        Self {
            horizontal_fov: overrides.horizontal_fov.unwrap_or(self.horizontal_fov),
            azimuth_step: overrides.azimuth_step.unwrap_or(self.azimuth_step),
            range_step: overrides.range_step.unwrap_or(self.range_step),
            max_range: overrides.max_range.unwrap_or(self.max_range),
            camera_height: overrides.camera_height.unwrap_or(self.camera_height),
            heading: overrides.heading.unwrap_or(self.heading),
        }
    }
}

/// Partial settings update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(rename = "hfov", default, skip_serializing_if = "Option::is_none")]
    pub horizontal_fov: Option<f64>,
    #[serde(rename = "azStep", default, skip_serializing_if = "Option::is_none")]
    pub azimuth_step: Option<f64>,
    #[serde(rename = "dStep", default, skip_serializing_if = "Option::is_none")]
    pub range_step: Option<f64>,
    #[serde(rename = "maxRange", default, skip_serializing_if = "Option::is_none")]
    pub max_range: Option<f64>,
    #[serde(rename = "cameraHeight", default, skip_serializing_if = "Option::is_none")]
    pub camera_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

impl SettingsOverride {
    /// Override that only changes the heading.
    pub fn heading_only(heading: f64) -> Self {
        Self {
            heading: Some(heading),
            ..Self::default()
        }
    }

    /// True if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
