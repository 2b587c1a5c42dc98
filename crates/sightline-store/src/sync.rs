//! Import cameras from field devices that report their position over HTTP.
//!
//! Each trusted device URL returns JSON `{lat, lng, ugol?, name?}`;
//! `ugol` is the heading in degrees.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use sightline_core::constants::{DEFAULT_HEADING_DEG, DEVICE_NAME_PREFIX};
use sightline_core::types::{GeoPoint, SettingsOverride};
use sightline_terrain::source::ElevationSource;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::store::CameraStore;

/// Trusted device list file: `{ "devices": ["http://...", ...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrustedDevices {
    pub devices: Vec<String>,
}

impl TrustedDevices {
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// A validated device position report.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport {
    pub name: String,
    pub position: GeoPoint,
    pub heading: f64,
}

/// Camera name used when a device does not report one: prefix + last URL segment.
pub fn default_device_name(url: &str) -> String {
    let tail = url.rsplit('/').next().unwrap_or(url);
    format!("{DEVICE_NAME_PREFIX}{tail}")
}

/// Validate a device response body. `lat` and `lng` must be JSON numbers.
pub fn parse_device_report(url: &str, body: &str) -> Result<DeviceReport, SyncError> {
    let value: Value = serde_json::from_str(body)?;

    let coord = |key: &str| value.get(key).and_then(Value::as_f64);
    let (Some(lat), Some(lng)) = (coord("lat"), coord("lng")) else {
        return Err(SyncError::MissingCoordinates {
            url: url.to_string(),
        });
    };

    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_device_name(url));
    let heading = value
        .get("ugol")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_HEADING_DEG);

    Ok(DeviceReport {
        name,
        position: GeoPoint::new(lat, lng),
        heading,
    })
}

/// Source of device reports.
pub trait DeviceFetcher {
    fn fetch(&self, url: &str) -> Result<DeviceReport, SyncError>;
}

/// Fetches reports with a blocking HTTP GET.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl DeviceFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<DeviceReport, SyncError> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        if !response.status().is_success() {
            return Err(SyncError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        let body = response.text()?;
        parse_device_report(url, &body)
    }
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Ids of the cameras created.
    pub added: Vec<String>,
    /// URLs that produced no camera.
    pub failed: Vec<String>,
}

/// Create one camera per device that returns a valid report.
///
/// A failing device is logged and skipped; it never aborts the others.
pub fn sync_devices<F, S>(
    store: &mut CameraStore,
    fetcher: &F,
    urls: &[String],
    terrain: &S,
) -> SyncReport
where
    F: DeviceFetcher + ?Sized,
    S: ElevationSource + ?Sized,
{
    let mut report = SyncReport::default();

    for url in urls {
        let created = fetcher.fetch(url).and_then(|device| {
            let overrides = SettingsOverride::heading_only(device.heading);
            let camera = store.create(device.name, device.position, &overrides, terrain)?;
            Ok(camera.id.clone())
        });

        match created {
            Ok(id) => report.added.push(id),
            Err(err) => {
                warn!(%url, error = %err, "device sync skipped");
                report.failed.push(url.clone());
            }
        }
    }

    info!(
        added = report.added.len(),
        failed = report.failed.len(),
        "device sync finished"
    );
    report
}
