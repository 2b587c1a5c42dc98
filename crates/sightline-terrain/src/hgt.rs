//! NASADEM / SRTM HGT tile reader and writer.
//!
//! HGT files are flat arrays of big-endian i16 elevation values
//! covering 1° × 1° tiles. The filename encodes the SW corner
//! coordinates (e.g., N43E042.hgt).

use std::path::Path;

use tracing::debug;

use crate::grid::{TerrainGrid, TerrainHeader};
use crate::source::TerrainError;

/// Void value in HGT files (no data).
pub const HGT_VOID: i16 = -32768;

/// Parse an HGT filename to extract the SW corner coordinates.
/// Format: `N43E042.hgt` or `S10W045.hgt`
pub fn parse_hgt_filename(filename: &str) -> Option<(f64, f64)> {
    let name = filename
        .strip_suffix(".hgt")
        .or_else(|| filename.strip_suffix(".HGT"))?;

    if name.len() < 7 || !name.is_ascii() {
        return None;
    }

    let lat_sign = match &name[0..1] {
        "N" | "n" => 1.0,
        "S" | "s" => -1.0,
        _ => return None,
    };
    let lat: f64 = name[1..3].parse().ok()?;

    let lon_sign = match &name[3..4] {
        "E" | "e" => 1.0,
        "W" | "w" => -1.0,
        _ => return None,
    };
    let lon: f64 = name[4..7].parse().ok()?;

    Some((lat * lat_sign, lon * lon_sign))
}

/// Canonical filename of the tile whose SW corner is at (`lat`, `lon`), both floored.
pub fn hgt_filename(lat: f64, lon: f64) -> String {
    let lat = lat.floor() as i32;
    let lon = lon.floor() as i32;
    format!(
        "{}{:02}{}{:03}.hgt",
        if lat < 0 { 'S' } else { 'N' },
        lat.abs(),
        if lon < 0 { 'W' } else { 'E' },
        lon.abs()
    )
}

/// Determine the grid size from the file size.
/// 1 arc-second: 3601 × 3601 = 25,934,402 bytes
/// 3 arc-second: 1201 × 1201 = 2,884,802 bytes
fn grid_size_from_byte_count(byte_count: usize) -> Option<(u32, f64)> {
    match byte_count {
        25_934_402 => Some((3601, 1.0)),
        2_884_802 => Some((1201, 3.0)),
        _ => None,
    }
}

/// Arc-seconds per cell for a square tile side, if it is a standard HGT size.
fn cell_size_for_side(side: u32) -> Option<f64> {
    match side {
        3601 => Some(1.0),
        1201 => Some(3.0),
        _ => None,
    }
}

/// Parse raw HGT bytes into elevation values.
pub fn parse_hgt_bytes(data: &[u8]) -> Result<(Vec<i16>, u32, f64), TerrainError> {
    let (grid_side, cell_size) = grid_size_from_byte_count(data.len())
        .ok_or(TerrainError::InvalidHgtSize { bytes: data.len() })?;

    let elevations = data
        .chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    Ok((elevations, grid_side, cell_size))
}

/// Fill void values (-32768) by averaging non-void neighbors.
pub fn fill_voids(elevations: &mut [i16], width: u32, height: u32) {
    let w = width as usize;
    let h = height as usize;

    let snapshot = elevations.to_vec();
    for r in 0..h {
        for c in 0..w {
            let idx = r * w + c;
            if snapshot[idx] != HGT_VOID {
                continue;
            }

            let mut sum = 0i64;
            let mut count = 0u32;
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = r as i32 + dr;
                    let nc = c as i32 + dc;
                    if nr >= 0 && nr < h as i32 && nc >= 0 && nc < w as i32 {
                        let nidx = nr as usize * w + nc as usize;
                        if snapshot[nidx] != HGT_VOID {
                            sum += snapshot[nidx] as i64;
                            count += 1;
                        }
                    }
                }
            }

            elevations[idx] = if count > 0 {
                (sum / count as i64) as i16
            } else {
                0
            };
        }
    }
}

/// Build a grid from a tile's SW corner and decoded samples.
///
/// Row 0 sits on the tile's north edge, column 0 on its west edge.
pub fn grid_from_tile(
    sw_lat: f64,
    sw_lon: f64,
    elevations: Vec<i16>,
    side: u32,
    cell_size: f64,
) -> TerrainGrid {
    let min_elevation = elevations.iter().copied().min().unwrap_or(0);
    let max_elevation = elevations.iter().copied().max().unwrap_or(0);

    let header = TerrainHeader {
        origin_lat: sw_lat + 1.0 - (side as f64 * cell_size) / 3600.0,
        origin_lon: sw_lon,
        cell_size,
        width: side,
        height: side,
        min_elevation,
        max_elevation,
    };

    TerrainGrid::new(header, elevations)
}

/// Load a single HGT file into a TerrainGrid.
pub fn load_hgt(path: &Path) -> Result<TerrainGrid, TerrainError> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| TerrainError::InvalidTileName(path.display().to_string()))?;

    let (sw_lat, sw_lon) = parse_hgt_filename(filename)
        .ok_or_else(|| TerrainError::InvalidTileName(filename.to_string()))?;

    let data = std::fs::read(path)?;
    let (mut elevations, grid_side, cell_size) = parse_hgt_bytes(&data)?;

    let voids = elevations.iter().filter(|&&e| e == HGT_VOID).count();
    fill_voids(&mut elevations, grid_side, grid_side);

    debug!(
        tile = filename,
        side = grid_side,
        voids,
        "loaded HGT tile"
    );

    Ok(grid_from_tile(sw_lat, sw_lon, elevations, grid_side, cell_size))
}

/// Serialize a square HGT-sized grid to big-endian tile bytes.
pub fn serialize_hgt(grid: &TerrainGrid) -> Result<Vec<u8>, TerrainError> {
    let h = &grid.header;
    let expected = (h.width as usize) * (h.height as usize);
    if h.width != h.height
        || cell_size_for_side(h.width).is_none()
        || grid.elevations.len() != expected
    {
        return Err(TerrainError::InvalidHgtSize {
            bytes: grid.elevations.len() * 2,
        });
    }

    let mut buf = Vec::with_capacity(expected * 2);
    for &elev in &grid.elevations {
        buf.extend_from_slice(&elev.to_be_bytes());
    }
    Ok(buf)
}

/// Write a grid as an HGT tile file.
pub fn write_hgt(grid: &TerrainGrid, path: &Path) -> Result<(), TerrainError> {
    let data = serialize_hgt(grid)?;
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hgt_filename() {
        assert_eq!(parse_hgt_filename("N43E042.hgt"), Some((43.0, 42.0)));
        assert_eq!(parse_hgt_filename("S10W045.hgt"), Some((-10.0, -45.0)));
        assert_eq!(parse_hgt_filename("n00e000.HGT"), Some((0.0, 0.0)));
        assert_eq!(parse_hgt_filename("invalid.hgt"), None);
        assert_eq!(parse_hgt_filename("N43E042.txt"), None);
        assert_eq!(parse_hgt_filename("Ж43E042.hgt"), None);
    }

    #[test]
    fn test_hgt_filename() {
        assert_eq!(hgt_filename(43.349, 42.437), "N43E042.hgt");
        assert_eq!(hgt_filename(-9.5, -44.2), "S10W045.hgt");
        assert_eq!(parse_hgt_filename(&hgt_filename(-9.5, -44.2)), Some((-10.0, -45.0)));
    }

    #[test]
    fn test_parse_rejects_odd_sizes() {
        let data = vec![0u8; 50];
        assert!(matches!(
            parse_hgt_bytes(&data),
            Err(TerrainError::InvalidHgtSize { bytes: 50 })
        ));
    }

    #[test]
    fn test_parse_three_arcsecond_tile() {
        let side = 1201usize;
        let mut data = vec![0u8; side * side * 2];
        // Sample (row 0, col 1) = 1234, last sample = -5
        data[2..4].copy_from_slice(&1234i16.to_be_bytes());
        let n = data.len();
        data[n - 2..].copy_from_slice(&(-5i16).to_be_bytes());

        let (elevations, grid_side, cell_size) = parse_hgt_bytes(&data).unwrap();
        assert_eq!(grid_side, 1201);
        assert_eq!(cell_size, 3.0);
        assert_eq!(elevations.len(), side * side);
        assert_eq!(elevations[1], 1234);
        assert_eq!(elevations[side * side - 1], -5);
    }

    #[test]
    fn test_fill_voids() {
        let mut elevations: Vec<i16> = vec![100, 200, 300, 100, HGT_VOID, 300, 100, 200, 300];

        fill_voids(&mut elevations, 3, 3);

        // Center void should be average of 8 neighbors: (100+200+300+100+300+100+200+300)/8 = 200
        assert_eq!(elevations[4], 200);
    }

    #[test]
    fn test_fill_voids_corner() {
        let mut elevations: Vec<i16> = vec![HGT_VOID, 100, 100, 100];

        fill_voids(&mut elevations, 2, 2);

        assert_eq!(elevations[0], 100);
    }

    #[test]
    fn test_tile_grid_edges() {
        let side = 1201u32;
        let elevations = vec![7i16; (side * side) as usize];
        let grid = grid_from_tile(43.0, 42.0, elevations, side, 3.0);

        assert!((grid.header.north_lat() - 44.0).abs() < 1e-9);
        assert_eq!(grid.header.origin_lon, 42.0);
        assert_eq!(grid.elevation_at_geo(43.5, 42.5), Some(7.0));
        assert!(grid.elevation_at_geo(42.5, 42.5).is_none());
    }

    #[test]
    fn test_write_and_load_tile() {
        let side = 1201u32;
        let mut elevations = vec![0i16; (side * side) as usize];
        elevations[0] = 900; // NW corner
        elevations[5] = HGT_VOID;
        let grid = grid_from_tile(43.0, 42.0, elevations, side, 3.0);

        let dir = std::env::temp_dir()
            .join(format!("sightline_test_hgt_roundtrip_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(hgt_filename(43.0, 42.0));

        write_hgt(&grid, &path).unwrap();
        let loaded = load_hgt(&path).unwrap();

        assert_eq!(loaded.header.width, side);
        assert_eq!(loaded.header.max_elevation, 900);
        assert_eq!(loaded.elevations[0], 900);
        // The void was filled from its (all zero) neighbours.
        assert_eq!(loaded.elevations[5], 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_serialize_rejects_non_tile_grid() {
        let grid = TerrainGrid::new(
            TerrainHeader {
                origin_lat: 0.0,
                origin_lon: 0.0,
                cell_size: 3.0,
                width: 4,
                height: 4,
                min_elevation: 0,
                max_elevation: 0,
            },
            vec![0; 16],
        );
        assert!(serialize_hgt(&grid).is_err());
    }

    #[test]
    fn test_load_rejects_bad_name() {
        let result = load_hgt(Path::new("/tmp/not-a-tile.bin"));
        assert!(matches!(result, Err(TerrainError::InvalidTileName(_))));
    }
}
