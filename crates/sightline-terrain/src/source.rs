//! Elevation query capability consumed by the visibility engine.

use std::io;

use sightline_core::types::GeoPoint;

/// Failures of a terrain data source. "No data here" is not an error; see [`ElevationSource`].
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected HGT file size: {bytes} bytes (expected {} or {})", 3601 * 3601 * 2, 1201 * 1201 * 2)]
    InvalidHgtSize { bytes: usize },

    #[error("cannot parse HGT tile coordinates from filename: {0}")]
    InvalidTileName(String),

    #[error("terrain source unavailable: {0}")]
    Unavailable(String),
}

/// Ground elevation lookup.
///
/// `Ok(None)` means the point lies outside the available coverage; the
/// visibility engine treats it as the end of a ray. `Err` means the data
/// source itself failed and aborts the whole computation.
pub trait ElevationSource {
    /// Ground elevation in meters at `point`.
    fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, TerrainError>;
}

impl<F> ElevationSource for F
where
    F: Fn(GeoPoint) -> Option<f64>,
{
    fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, TerrainError> {
        Ok(self(point))
    }
}

/// Constant-elevation terrain with unlimited coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain(pub f64);

impl ElevationSource for FlatTerrain {
    fn elevation_at(&self, _point: GeoPoint) -> Result<Option<f64>, TerrainError> {
        Ok(Some(self.0))
    }
}
