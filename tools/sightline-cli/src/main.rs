//! sightline: camera coverage planning from the command line.
//!
//! Usage:
//!   sightline --hgt N43E042.hgt place --name Mast --lat 43.349 --lng 42.437 --heading 120
//!   sightline --hgt N43E042.hgt rotate camera-… --delta -15
//!   sightline export --output coverage.geojson
//!   sightline synthetic --lat 43 --lng 42 --output terrain/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use sightline_core::camera::feature_collection;
use sightline_core::constants::ROTATE_STEP_DEG;
use sightline_core::types::{CameraSettings, GeoPoint, SettingsOverride};
use sightline_store::persistence::{load_store, save_store};
use sightline_store::sync::{sync_devices, HttpFetcher, TrustedDevices};
use sightline_store::CameraStore;
use sightline_terrain::hgt::{grid_from_tile, hgt_filename, write_hgt};
use sightline_terrain::source::{ElevationSource, FlatTerrain};
use sightline_terrain::viewshed::{coverage_cone, heading_marker};
use sightline_terrain::TerrainMosaic;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sightline", about = "Camera line-of-sight coverage planner")]
struct Cli {
    /// Directory holding camera-storage.json
    #[arg(long, global = true, default_value = ".")]
    store_dir: PathBuf,
    /// HGT terrain tile (repeatable). Flat sea-level terrain when absent.
    #[arg(long = "hgt", global = true)]
    hgt: Vec<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a new camera and compute its coverage.
    Place {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Change any subset of a camera's settings.
    Update {
        id: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Turn a camera clockwise by --delta degrees (negative turns counter-clockwise).
    Rotate {
        id: String,
        #[arg(long, allow_hyphen_values = true, default_value_t = ROTATE_STEP_DEG)]
        delta: f64,
    },
    /// Rename a camera.
    Rename { id: String, name: String },
    /// Remove a camera.
    Remove { id: String },
    /// List cameras.
    List,
    /// Write markers and coverage polygons as a GeoJSON FeatureCollection.
    Export {
        /// Output file (stdout when absent)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the unoccluded placement cone for a prospective camera as GeoJSON.
    Preview {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Import cameras from the devices listed in a trusted-devices file.
    Sync {
        /// JSON file: {"devices": ["http://...", ...]}
        #[arg(long)]
        devices: PathBuf,
        /// Per-device request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Generate a synthetic 3 arc-second HGT tile with ridges for demos.
    Synthetic {
        /// Tile SW corner latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Tile SW corner longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

/// Camera settings flags; unspecified flags keep the current (or default) value.
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// Horizontal field of view (degrees, 10-180)
    #[arg(long)]
    hfov: Option<f64>,
    /// Bearing step (degrees)
    #[arg(long)]
    az_step: Option<f64>,
    /// Sample spacing along each ray (meters)
    #[arg(long)]
    range_step: Option<f64>,
    /// Maximum range (meters)
    #[arg(long)]
    max_range: Option<f64>,
    /// Mounting height above terrain (meters)
    #[arg(long)]
    height: Option<f64>,
    /// Heading (degrees, 0 = North, clockwise)
    #[arg(long, allow_hyphen_values = true)]
    heading: Option<f64>,
}

impl From<&SettingsArgs> for SettingsOverride {
    fn from(args: &SettingsArgs) -> Self {
        SettingsOverride {
            horizontal_fov: args.hfov,
            azimuth_step: args.az_step,
            range_step: args.range_step,
            max_range: args.max_range,
            camera_height: args.height,
            heading: args.heading,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Place {
            name,
            lat,
            lng,
            settings,
        } => {
            let terrain = load_terrain(&cli.hgt)?;
            edit_store(&cli.store_dir, |store| {
                let cam = store.create(
                    name.clone(),
                    GeoPoint::new(*lat, *lng),
                    &settings.into(),
                    terrain.as_ref(),
                )?;
                println!("{}", cam.id);
                Ok(())
            })
        }
        Commands::Update { id, settings } => {
            let overrides = SettingsOverride::from(settings);
            if overrides.is_empty() {
                bail!("nothing to update: pass at least one settings flag");
            }
            let terrain = load_terrain(&cli.hgt)?;
            edit_store(&cli.store_dir, |store| {
                store.update_settings(id, &overrides, terrain.as_ref())?;
                Ok(())
            })
        }
        Commands::Rotate { id, delta } => {
            let terrain = load_terrain(&cli.hgt)?;
            edit_store(&cli.store_dir, |store| {
                let cam = store.rotate(id, *delta, terrain.as_ref())?;
                println!("{} heading {:.1}°", cam.id, cam.settings.heading);
                Ok(())
            })
        }
        Commands::Rename { id, name } => edit_store(&cli.store_dir, |store| {
            store.rename(id, name.clone())?;
            Ok(())
        }),
        Commands::Remove { id } => edit_store(&cli.store_dir, |store| {
            let cam = store.remove(id)?;
            println!("removed {} ({})", cam.id, cam.name);
            Ok(())
        }),
        Commands::List => {
            let store = load_store(&cli.store_dir).context("reading camera storage")?;
            for cam in store.cameras() {
                println!(
                    "{}  {:<20} {:>9.5} {:>10.5}  heading {:>5.1}°  fov {:>5.1}°  range {:>6.0} m  points {}",
                    cam.id,
                    cam.name,
                    cam.position.latitude,
                    cam.position.longitude,
                    cam.settings.heading,
                    cam.settings.horizontal_fov,
                    cam.settings.max_range,
                    cam.visibility_polygon.len(),
                );
            }
            Ok(())
        }
        Commands::Export { output } => {
            let store = load_store(&cli.store_dir).context("reading camera storage")?;
            let geojson = serde_json::to_string_pretty(&feature_collection(store.cameras()))?;
            match output {
                Some(path) => {
                    std::fs::write(path, geojson)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), cameras = store.len(), "coverage exported");
                }
                None => println!("{geojson}"),
            }
            Ok(())
        }
        Commands::Preview { lat, lng, settings } => {
            let camera = GeoPoint::new(*lat, *lng);
            camera.validate()?;
            let settings = CameraSettings::default().with_overrides(&settings.into());
            settings.validate()?;
            println!("{}", serde_json::to_string_pretty(&preview_geojson(camera, &settings))?);
            Ok(())
        }
        Commands::Sync {
            devices,
            timeout_secs,
        } => {
            let devices = TrustedDevices::load(devices)
                .with_context(|| format!("reading {}", devices.display()))?;
            let fetcher = HttpFetcher::new(Duration::from_secs(*timeout_secs))?;
            let terrain = load_terrain(&cli.hgt)?;
            edit_store(&cli.store_dir, |store| {
                let report = sync_devices(store, &fetcher, &devices.devices, terrain.as_ref());
                if report.added.is_empty() {
                    bail!("no cameras added ({} devices failed)", report.failed.len());
                }
                println!(
                    "sync complete: {} added, {} failed",
                    report.added.len(),
                    report.failed.len()
                );
                Ok(())
            })
        }
        Commands::Synthetic { lat, lng, output } => cmd_synthetic(*lat, *lng, output),
    }
}

/// Load the store, run `f`, and save only if `f` succeeded.
fn edit_store<F>(dir: &Path, f: F) -> Result<()>
where
    F: FnOnce(&mut CameraStore) -> Result<()>,
{
    let mut store = load_store(dir).context("reading camera storage")?;
    f(&mut store)?;
    save_store(dir, &store).context("writing camera storage")?;
    Ok(())
}

fn load_terrain(paths: &[PathBuf]) -> Result<Box<dyn ElevationSource>> {
    if paths.is_empty() {
        warn!("no --hgt tiles given; using flat sea-level terrain");
        return Ok(Box::new(FlatTerrain(0.0)));
    }
    let mosaic = TerrainMosaic::load_tiles(paths).context("loading terrain tiles")?;
    Ok(Box::new(mosaic))
}

fn preview_geojson(camera: GeoPoint, settings: &CameraSettings) -> serde_json::Value {
    let mut ring = vec![camera.to_lng_lat()];
    ring.extend(coverage_cone(camera, settings).iter().map(GeoPoint::to_lng_lat));
    ring.push(camera.to_lng_lat());
    let arrow = heading_marker(camera, settings);

    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": camera.to_lng_lat() },
                "properties": { "role": "placement" },
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [camera.to_lng_lat(), arrow.to_lng_lat()],
                },
                "properties": { "role": "heading" },
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [ring] },
                "properties": { "role": "cone" },
            },
        ],
    })
}

// --- Synthetic terrain command ---

/// Samples per side of a 3 arc-second tile.
const TILE_SIDE: u32 = 1201;

fn cmd_synthetic(lat: f64, lng: f64, output: &Path) -> Result<()> {
    let (sw_lat, sw_lon) = (lat.floor(), lng.floor());
    GeoPoint::new(sw_lat, sw_lon).validate()?;

    let mut elevations = Vec::with_capacity((TILE_SIDE * TILE_SIDE) as usize);
    for row in 0..TILE_SIDE {
        for col in 0..TILE_SIDE {
            // Normalized coordinates (0..1): nx west→east, ny south→north
            let nx = col as f64 / (TILE_SIDE - 1) as f64;
            let ny = 1.0 - row as f64 / (TILE_SIDE - 1) as f64;
            elevations.push(synthetic_elevation(nx, ny).round() as i16);
        }
    }

    let grid = grid_from_tile(sw_lat, sw_lon, elevations, TILE_SIDE, 3.0);
    std::fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;
    let path = output.join(hgt_filename(sw_lat, sw_lon));
    write_hgt(&grid, &path).with_context(|| format!("writing {}", path.display()))?;

    println!(
        "{} ({}..{} m)",
        path.display(),
        grid.header.min_elevation,
        grid.header.max_elevation
    );
    Ok(())
}

/// Rolling valley floor crossed by a north-south ridge line with a few summits.
fn synthetic_elevation(nx: f64, ny: f64) -> f64 {
    let floor = 400.0 + 80.0 * (nx * 9.0).sin() * (ny * 7.0).cos();

    // Ridge meanders around the tile's center meridian.
    let ridge_x = 0.5 + 0.08 * (ny * 6.0).sin();
    let across = (nx - ridge_x) / 0.06;
    let ridge = 900.0 * (-across * across).exp() * (0.7 + 0.3 * (ny * 11.0).cos());

    let peak1 = summit(nx, ny, 0.25, 0.7, 0.08, 1400.0);
    let peak2 = summit(nx, ny, 0.78, 0.3, 0.06, 1100.0);

    floor + ridge.max(peak1).max(peak2)
}

/// Gaussian summit of `height` at (cx, cy) with radius `r` (normalized units).
fn summit(nx: f64, ny: f64, cx: f64, cy: f64, r: f64, height: f64) -> f64 {
    let dx = (nx - cx) / r;
    let dy = (ny - cy) / r;
    height * (-(dx * dx + dy * dy)).exp()
}
