//! Coverage constants and tuning parameters.

// --- Geodesy ---

/// Mean Earth radius used by the spherical projector (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// --- Default camera settings ---

/// Default horizontal field of view (degrees).
pub const DEFAULT_HFOV_DEG: f64 = 60.0;

/// Default angular step between swept bearings (degrees).
pub const DEFAULT_AZIMUTH_STEP_DEG: f64 = 1.0;

/// Default distance between terrain samples along a ray (meters).
pub const DEFAULT_RANGE_STEP_M: f64 = 100.0;

/// Default maximum ray length (meters).
pub const DEFAULT_MAX_RANGE_M: f64 = 8_000.0;

/// Default mounting height above local terrain (meters).
pub const DEFAULT_CAMERA_HEIGHT_M: f64 = 30.0;

/// Default heading (degrees, 0 = North, clockwise).
pub const DEFAULT_HEADING_DEG: f64 = 90.0;

// --- Settings limits ---

/// Narrowest accepted field of view (degrees).
pub const MIN_HFOV_DEG: f64 = 10.0;

/// Widest accepted field of view (degrees).
pub const MAX_HFOV_DEG: f64 = 180.0;

/// Upper bound on terrain samples for a single polygon (bearings × ray samples).
pub const MAX_SAMPLES_PER_POLYGON: usize = 4_000_000;

// --- Operator controls ---

/// Heading change applied by a single rotate action (degrees).
pub const ROTATE_STEP_DEG: f64 = 15.0;

/// Bearing step of the unoccluded placement preview cone (degrees).
pub const PREVIEW_AZIMUTH_STEP_DEG: f64 = 2.0;

// --- Persistence / sync ---

/// Storage key of the persisted camera list.
pub const STORAGE_KEY: &str = "camera-storage";

/// Prefix of generated camera ids.
pub const CAMERA_ID_PREFIX: &str = "camera-";

/// Name prefix for cameras reported by a device without a name.
pub const DEVICE_NAME_PREFIX: &str = "ОПУ-";
