//! Camera record: placement, settings and the cached visibility polygon.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::{CameraSettings, GeoPoint};

/// A placed camera.
///
/// `settings` and `visibility_polygon` always describe the same computation;
/// they are only ever replaced together by the owning store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub position: GeoPoint,
    pub settings: CameraSettings,
    /// Farthest visible point per swept bearing, in sweep order. Not closed.
    #[serde(rename = "polygon", default)]
    pub visibility_polygon: Vec<GeoPoint>,
}

impl Camera {
    /// Closed ring through the camera position: `[position, polygon..., position]`.
    ///
    /// Empty when the polygon is empty.
    pub fn footprint_ring(&self) -> Vec<GeoPoint> {
        if self.visibility_polygon.is_empty() {
            return Vec::new();
        }
        let mut ring = Vec::with_capacity(self.visibility_polygon.len() + 2);
        ring.push(self.position);
        ring.extend_from_slice(&self.visibility_polygon);
        ring.push(self.position);
        ring
    }

    /// GeoJSON `Feature` with the footprint polygon, or `None` if nothing is visible.
    pub fn to_geojson(&self) -> Option<Value> {
        let ring: Vec<[f64; 2]> = self
            .footprint_ring()
            .iter()
            .map(GeoPoint::to_lng_lat)
            .collect();
        if ring.is_empty() {
            return None;
        }
        Some(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring],
            },
            "properties": {
                "id": self.id,
                "name": self.name,
                "heading": self.settings.heading,
            },
        }))
    }

    /// GeoJSON `Feature` for the camera marker itself.
    pub fn marker_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": self.position.to_lng_lat(),
            },
            "properties": {
                "id": self.id,
                "name": self.name,
            },
        })
    }
}

/// `FeatureCollection` with a marker and (when non-empty) a footprint per camera.
pub fn feature_collection(cameras: &[Camera]) -> Value {
    let mut features = Vec::with_capacity(cameras.len() * 2);
    for camera in cameras {
        features.push(camera.marker_geojson());
        if let Some(footprint) = camera.to_geojson() {
            features.push(footprint);
        }
    }
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
