//! TerrainGrid: geographic heightmap with elevation queries.

use sightline_core::types::GeoPoint;

use crate::source::{ElevationSource, TerrainError};

/// Terrain grid header metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainHeader {
    /// Southwest corner latitude (degrees).
    pub origin_lat: f64,
    /// Southwest corner longitude (degrees).
    pub origin_lon: f64,
    /// Arc-seconds per grid cell.
    pub cell_size: f64,
    /// Number of columns (west to east).
    pub width: u32,
    /// Number of rows (north to south).
    pub height: u32,
    /// Minimum elevation in the grid (meters).
    pub min_elevation: i16,
    /// Maximum elevation in the grid (meters).
    pub max_elevation: i16,
}

impl TerrainHeader {
    /// North edge latitude (degrees).
    pub fn north_lat(&self) -> f64 {
        self.origin_lat + (self.height as f64 * self.cell_size) / 3600.0
    }

    /// East edge longitude (degrees).
    pub fn east_lon(&self) -> f64 {
        self.origin_lon + (self.width as f64 * self.cell_size) / 3600.0
    }
}

/// Loaded terrain heightmap.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    pub header: TerrainHeader,
    /// Elevation values in meters, row-major (north-to-south, west-to-east).
    pub elevations: Vec<i16>,
}

impl TerrainGrid {
    /// Create a TerrainGrid from pre-loaded data.
    pub fn new(header: TerrainHeader, elevations: Vec<i16>) -> Self {
        Self { header, elevations }
    }

    /// True if the point falls inside the grid footprint.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.geo_to_grid(point.latitude, point.longitude).is_some()
    }

    /// Convert lat/lon to grid row/col (fractional).
    /// Returns None if outside grid bounds.
    fn geo_to_grid(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        let h = &self.header;

        // Column: west-to-east
        let col = (lon - h.origin_lon) * 3600.0 / h.cell_size;
        // Row: north-to-south (row 0 = north edge)
        let row = (h.north_lat() - lat) * 3600.0 / h.cell_size;

        if !(col >= 0.0 && row >= 0.0 && col < h.width as f64 && row < h.height as f64) {
            return None;
        }

        Some((row, col))
    }

    /// Get raw elevation at integer grid coordinates.
    fn raw_elevation(&self, row: usize, col: usize) -> i16 {
        let h = &self.header;
        if row >= h.height as usize || col >= h.width as usize {
            return 0;
        }
        self.elevations
            .get(row * h.width as usize + col)
            .copied()
            .unwrap_or(0)
    }

    /// Elevation at lat/lon with bilinear interpolation.
    /// Returns None if the position is outside the grid.
    pub fn elevation_at_geo(&self, lat: f64, lon: f64) -> Option<f64> {
        let (row, col) = self.geo_to_grid(lat, lon)?;
        Some(self.bilinear(row, col))
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.header.height as usize - 1);
        let c1 = (c0 + 1).min(self.header.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let e00 = self.raw_elevation(r0, c0) as f64;
        let e01 = self.raw_elevation(r0, c1) as f64;
        let e10 = self.raw_elevation(r1, c0) as f64;
        let e11 = self.raw_elevation(r1, c1) as f64;

        let top = e00 * (1.0 - fc) + e01 * fc;
        let bot = e10 * (1.0 - fc) + e11 * fc;
        top * (1.0 - fr) + bot * fr
    }
}

impl ElevationSource for TerrainGrid {
    fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, TerrainError> {
        Ok(self.elevation_at_geo(point.latitude, point.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple 5×5 test grid centered at (43.35, 42.44).
    fn make_test_grid() -> TerrainGrid {
        let cell_size = 1.0; // 1 arc-second
        let width = 5u32;
        let height = 5u32;
        let origin_lat = 43.35 - (height as f64 * cell_size / 3600.0) / 2.0;
        let origin_lon = 42.44 - (width as f64 * cell_size / 3600.0) / 2.0;

        // Elevation: center cell is 100m, edges are 0
        #[rustfmt::skip]
        let elevations: Vec<i16> = vec![
            0,   0,   0,   0,   0,
            0,  50,  50,  50,   0,
            0,  50, 100,  50,   0,
            0,  50,  50,  50,   0,
            0,   0,   0,   0,   0,
        ];

        TerrainGrid::new(
            TerrainHeader {
                origin_lat,
                origin_lon,
                cell_size,
                width,
                height,
                min_elevation: 0,
                max_elevation: 100,
            },
            elevations,
        )
    }

    #[test]
    fn test_elevation_query_center() {
        let grid = make_test_grid();
        let h = &grid.header;

        // The peak cell is at grid row=2, col=2 (0-indexed).
        let peak_lat = h.north_lat() - 2.0 * h.cell_size / 3600.0;
        let peak_lon = h.origin_lon + 2.0 * h.cell_size / 3600.0;

        let e = grid
            .elevation_at_geo(peak_lat, peak_lon)
            .expect("Peak cell should be within grid");
        assert!(
            (e - 100.0).abs() < 1.0,
            "Peak elevation should be ~100m, got {e}"
        );
    }

    #[test]
    fn test_elevation_query_outside() {
        let grid = make_test_grid();

        assert!(grid.elevation_at_geo(44.35, 42.44).is_none());
        assert!(grid.elevation_at_geo(43.35, 41.0).is_none());
        assert!(grid.elevation_at_geo(f64::NAN, 42.44).is_none());
        assert!(!grid.contains(GeoPoint::new(44.35, 42.44)));
        assert!(grid.contains(GeoPoint::new(43.35, 42.44)));
    }

    #[test]
    fn test_elevation_bilinear_interpolation() {
        let grid = make_test_grid();
        let h = &grid.header;

        // Position at row=1.5, col=2 (between rows 1 and 2, center column)
        // Row 1 col 2 = 50, Row 2 col 2 = 100 → interpolated = 75
        let lat = h.north_lat() - 1.5 * h.cell_size / 3600.0;
        let lon = h.origin_lon + 2.0 * h.cell_size / 3600.0;
        let elev = grid.elevation_at_geo(lat, lon).unwrap();
        assert!(
            (elev - 75.0).abs() < 1.0,
            "Interpolated elevation should be ~75m, got {elev}"
        );
    }

    #[test]
    fn test_elevation_source_impl() {
        let grid = make_test_grid();
        let inside = grid.elevation_at(GeoPoint::new(43.35, 42.44)).unwrap();
        assert!(inside.is_some());
        let outside = grid.elevation_at(GeoPoint::new(0.0, 0.0)).unwrap();
        assert!(outside.is_none());
    }

    #[test]
    fn test_header_edges() {
        let grid = make_test_grid();
        let h = &grid.header;
        assert!((h.north_lat() - h.origin_lat - 5.0 / 3600.0).abs() < 1e-12);
        assert!((h.east_lon() - h.origin_lon - 5.0 / 3600.0).abs() < 1e-12);
    }
}
