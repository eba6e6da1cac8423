//! Geographic primitives for PhotoSpot.
//!
//! This crate provides:
//! - Haversine great-circle distance
//! - Location blurring: an area-uniform random point within a radius
//! - Validated bounding boxes for map viewports
//! - PostGIS POINT parsing (GeoJSON, WKT and EWKT)
//! - WASM bindings for browser usage
//!
//! Everything here is pure. Randomness is always supplied by the caller.
//!
//! # Example
//!
//! ```
//! use photospot_geo::{distance_meters, random_offset_point, GeoPoint};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let center = GeoPoint::new(-122.4194, 37.7749); // San Francisco
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let public = random_offset_point(&center, 200.0, &mut rng).unwrap();
//! assert!(distance_meters(&center, &public) <= 200.0 + 1e-6);
//! ```

mod bbox;
mod blur;
mod error;
mod haversine;
mod postgis;

#[cfg(feature = "wasm")]
mod wasm;

pub use bbox::{BboxViolation, BoundingBox};
pub use blur::{
    normalize_longitude, random_offset_point, BlurSettings, PhotoLocationPair, DEFAULT_BLUR_RADIUS_M,
    MAX_BLUR_RADIUS_M, MIN_BLUR_RADIUS_M,
};
pub use error::{GeoError, Result};
pub use haversine::{distance_km, distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use postgis::{parse_postgis_point, to_ewkt};

/// A geographic coordinate, longitude first (GeoJSON order).
///
/// Serialized as `[lon, lat]`; deserialization rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a new point without validating it.
    #[inline]
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Creates a point, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] when the point is not valid.
    pub fn try_new(lon: f64, lat: f64) -> Result<Self> {
        let point = Self::new(lon, lat);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({lon}, {lat}) is outside lon [-180, 180], lat [-90, 90]")))
        }
    }

    /// Returns true if both values are finite and within range.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// `(lat, lon)` in radians.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = GeoError;

    fn try_from([lon, lat]: [f64; 2]) -> Result<Self> {
        Self::try_new(lon, lat)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}
