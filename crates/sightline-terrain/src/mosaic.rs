//! Several terrain grids queried as one coverage area.

use std::path::Path;

use sightline_core::types::GeoPoint;
use tracing::info;

use crate::grid::TerrainGrid;
use crate::hgt::load_hgt;
use crate::source::{ElevationSource, TerrainError};

/// Ordered set of grids; the first grid covering a point answers for it.
#[derive(Debug, Clone, Default)]
pub struct TerrainMosaic {
    grids: Vec<TerrainGrid>,
}

impl TerrainMosaic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grids(grids: Vec<TerrainGrid>) -> Self {
        Self { grids }
    }

    /// Load every HGT tile in `paths`. Fails on the first unreadable tile.
    pub fn load_tiles<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TerrainError> {
        let mut grids = Vec::with_capacity(paths.len());
        for path in paths {
            grids.push(load_hgt(path.as_ref())?);
        }
        info!(tiles = grids.len(), "terrain mosaic loaded");
        Ok(Self { grids })
    }

    pub fn push(&mut self, grid: TerrainGrid) {
        self.grids.push(grid);
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Grid covering `point`, if any.
    pub fn grid_for(&self, point: GeoPoint) -> Option<&TerrainGrid> {
        self.grids.iter().find(|g| g.contains(point))
    }
}

impl ElevationSource for TerrainMosaic {
    fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, TerrainError> {
        Ok(self
            .grid_for(point)
            .and_then(|g| g.elevation_at_geo(point.latitude, point.longitude)))
    }
}
