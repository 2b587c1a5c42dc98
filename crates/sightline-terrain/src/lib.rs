//! Terrain system for SIGHTLINE.
//!
//! Spherical geodesy, elevation sources (HGT tiles, mosaics),
//! and the camera visibility polygon.

pub use sightline_core as core;

pub mod geodesy;
pub mod grid;
pub mod hgt;
pub mod mosaic;
pub mod source;
pub mod viewshed;

// Re-export key types for convenience.
pub use geodesy::{destination_point, great_circle_distance, normalize_bearing};
pub use grid::{TerrainGrid, TerrainHeader};
pub use mosaic::TerrainMosaic;
pub use source::{ElevationSource, FlatTerrain, TerrainError};
pub use viewshed::{compute_visibility_polygon, coverage_cone, heading_marker, ViewshedError};
