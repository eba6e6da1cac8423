//! WASM bindings for the geo crate.
//!
//! Lets the upload form preview a blurred pin and validate a viewport in the
//! browser with the same code the server runs.

use crate::{distance_meters, parse_postgis_point, random_offset_point, BoundingBox, GeoPoint};
use wasm_bindgen::prelude::*;

/// Great-circle distance in meters.
#[wasm_bindgen]
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    distance_meters(&GeoPoint::new(lon1, lat1), &GeoPoint::new(lon2, lat2))
}

/// Random point within `radius_meters` of the center, as `[lon, lat]`.
#[wasm_bindgen]
pub fn random_offset(lon: f64, lat: f64, radius_meters: f64) -> Result<Vec<f64>, JsValue> {
    let mut rng = rand::thread_rng();
    let point = random_offset_point(&GeoPoint::new(lon, lat), radius_meters, &mut rng)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(vec![point.lon, point.lat])
}

/// Validate a viewport; returns an empty string when valid, otherwise the reasons.
#[wasm_bindgen]
pub fn bbox_problems(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> String {
    BoundingBox::violations(min_lon, min_lat, max_lon, max_lat)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a PostGIS location and return `[lon, lat]`, or null.
#[wasm_bindgen]
pub fn parse_location(location_json: &str) -> Result<JsValue, JsValue> {
    let value: serde_json::Value =
        serde_json::from_str(location_json).map_err(|e| JsValue::from_str(&format!("JSON parse error: {e}")))?;

    Ok(match parse_postgis_point(&value) {
        Some(point) => JsValue::from_str(&format!("[{},{}]", point.lon, point.lat)),
        None => JsValue::NULL,
    })
}
