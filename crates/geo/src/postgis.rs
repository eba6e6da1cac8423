//! PostGIS POINT parsing utilities.
//!
//! Supports parsing coordinates from:
//! - GeoJSON format: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT format: `POINT(lng lat)`
//! - EWKT format: `SRID=4326;POINT(lng lat)`

use crate::{GeoError, GeoPoint, Result};

/// Parse a PostGIS point from a JSON value.
///
/// This is the entry point for decoding `geography(Point)` columns returned
/// by PostgREST. Out-of-range coordinates are treated as unparseable.
///
/// # Returns
/// * `Some(GeoPoint)` if parsing succeeds
/// * `None` if the value is null or cannot be parsed
///
/// # Example
/// ```
/// use photospot_geo::parse_postgis_point;
/// use serde_json::json;
///
/// // GeoJSON format
/// let geojson = json!({"type": "Point", "coordinates": [13.4050, 52.5200]});
/// let point = parse_postgis_point(&geojson).unwrap();
/// assert!((point.lat - 52.5200).abs() < 0.0001);
///
/// // EWKT format
/// let ewkt = json!("SRID=4326;POINT(13.4050 52.5200)");
/// let point = parse_postgis_point(&ewkt).unwrap();
/// assert!((point.lon - 13.4050).abs() < 0.0001);
/// ```
#[must_use]
pub fn parse_postgis_point(value: &serde_json::Value) -> Option<GeoPoint> {
    let point = match value {
        serde_json::Value::Object(_) => {
            let coords = value.get("coordinates")?.as_array()?;
            if coords.len() < 2 {
                return None;
            }
            GeoPoint::new(coords[0].as_f64()?, coords[1].as_f64()?)
        }
        serde_json::Value::String(wkt) => parse_wkt_point(wkt).ok()?,
        _ => return None,
    };

    point.is_valid().then_some(point)
}

/// Format a point as EWKT for writing into a `geography` column.
///
/// ```
/// use photospot_geo::{to_ewkt, GeoPoint};
///
/// assert_eq!(to_ewkt(&GeoPoint::new(-122.5, 37.75)), "SRID=4326;POINT(-122.5 37.75)");
/// ```
#[must_use]
pub fn to_ewkt(point: &GeoPoint) -> String {
    format!("SRID=4326;POINT({} {})", point.lon, point.lat)
}

/// Parse a WKT or EWKT POINT string.
///
/// Format: `[SRID=n;]POINT(longitude latitude)`
fn parse_wkt_point(wkt: &str) -> Result<GeoPoint> {
    let mut wkt = wkt.trim();

    if let Some(rest) = wkt.strip_prefix("SRID=") {
        let (srid, geometry) = rest
            .split_once(';')
            .ok_or_else(|| GeoError::InvalidWkt(format!("Missing ';' after SRID in: {wkt}")))?;
        if srid.trim() != "4326" {
            return Err(GeoError::InvalidWkt(format!("Unsupported SRID {srid}, expected 4326")));
        }
        wkt = geometry.trim();
    }

    if !wkt.starts_with("POINT(") && !wkt.starts_with("POINT (") {
        return Err(GeoError::InvalidWkt(format!("Expected POINT, got: {wkt}")));
    }

    // Find the coordinates between parentheses
    let start = wkt.find('(').ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = wkt.find(')').ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if start >= end {
        return Err(GeoError::InvalidWkt("Invalid parentheses".into()));
    }

    let parts: Vec<&str> = wkt[start + 1..end].split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lon: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Ok(GeoPoint::new(lon, lat))
}
