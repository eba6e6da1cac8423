//! Location blurring.
//!
//! A photographer can hide the exact shoot location behind a public point
//! drawn once, at upload time, uniformly by area from the disc of a chosen
//! radius around the exact point. The public point is then stored; it is
//! never re-drawn on read, so a map pin does not move between refreshes.

use crate::haversine::EARTH_RADIUS_M;
use crate::{GeoError, GeoPoint, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Smallest blur radius a photographer may choose, in meters.
pub const MIN_BLUR_RADIUS_M: u32 = 100;

/// Largest blur radius a photographer may choose, in meters.
pub const MAX_BLUR_RADIUS_M: u32 = 500;

/// Radius used when blurring is enabled without an explicit radius.
pub const DEFAULT_BLUR_RADIUS_M: u32 = 200;

/// Draws a random point within `radius_meters` of `center`.
///
/// The bearing is uniform in `[0, 2π)` and the distance is
/// `sqrt(u) * radius_meters` with `u` uniform in `[0, 1)`, which makes the
/// result uniform over the disc area. The point is then placed with the
/// spherical destination-point formula and its longitude normalized into
/// `[-180, 180)`.
///
/// Accepts any positive radius; the 100 to 500 m policy range is enforced by
/// [`BlurSettings`].
///
/// # Errors
///
/// - [`GeoError::InvalidRadius`] if `radius_meters` is not a positive finite number
/// - [`GeoError::InvalidCoordinate`] if `center` is not a valid point
pub fn random_offset_point<R: Rng + ?Sized>(center: &GeoPoint, radius_meters: f64, rng: &mut R) -> Result<GeoPoint> {
    if !(radius_meters.is_finite() && radius_meters > 0.0) {
        return Err(GeoError::InvalidRadius(radius_meters));
    }
    if !center.is_valid() {
        return Err(GeoError::InvalidCoordinate(format!("blur center {center} is out of range")));
    }

    let bearing = rng.gen_range(0.0..TAU);
    let u: f64 = rng.gen_range(0.0..1.0);
    let distance = u.sqrt() * radius_meters;

    Ok(destination_point(center, distance / EARTH_RADIUS_M, bearing))
}

/// Forward problem on a sphere: start, angular distance, bearing.
fn destination_point(start: &GeoPoint, angular_distance: f64, bearing: f64) -> GeoPoint {
    let (lat1, lon1) = start.to_radians();
    let (sin_d, cos_d) = angular_distance.sin_cos();

    let sin_lat2 = (lat1.sin() * cos_d + lat1.cos() * sin_d * bearing.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = lon1 + (bearing.sin() * sin_d * lat1.cos()).atan2(cos_d - lat1.sin() * sin_lat2);

    GeoPoint::new(normalize_longitude(lon2.to_degrees()), lat2.to_degrees())
}

/// Wraps a longitude in degrees into `[-180, 180)`.
///
/// ```
/// use photospot_geo::normalize_longitude;
///
/// assert_eq!(normalize_longitude(190.0), -170.0);
/// assert_eq!(normalize_longitude(180.0), -180.0);
/// assert_eq!(normalize_longitude(-190.0), 170.0);
/// ```
#[must_use]
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

/// A photo's location-privacy choice, fixed at upload time.
///
/// Deserialization applies the same radius range as [`BlurSettings::with_radius`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawBlurSettings")]
pub struct BlurSettings {
    enabled: bool,
    radius_meters: Option<u32>,
}

/// Unchecked wire form of [`BlurSettings`].
#[derive(Deserialize)]
struct RawBlurSettings {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    radius_meters: Option<u32>,
}

impl TryFrom<RawBlurSettings> for BlurSettings {
    type Error = GeoError;

    fn try_from(raw: RawBlurSettings) -> Result<Self> {
        match (raw.enabled, raw.radius_meters) {
            (false, _) => Ok(Self::disabled()),
            (true, None) => Ok(Self::default_enabled()),
            (true, Some(radius)) => Self::with_radius(radius),
        }
    }
}

impl BlurSettings {
    /// No blurring: the public point is the exact point.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            radius_meters: None,
        }
    }

    /// Blurring with the default radius.
    #[must_use]
    pub const fn default_enabled() -> Self {
        Self {
            enabled: true,
            radius_meters: Some(DEFAULT_BLUR_RADIUS_M),
        }
    }

    /// Blurring with an explicit radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::BlurRadiusOutOfRange`] outside 100..=500 m.
    pub fn with_radius(radius_meters: u32) -> Result<Self> {
        if !(MIN_BLUR_RADIUS_M..=MAX_BLUR_RADIUS_M).contains(&radius_meters) {
            return Err(GeoError::BlurRadiusOutOfRange {
                radius: radius_meters,
                min: MIN_BLUR_RADIUS_M,
                max: MAX_BLUR_RADIUS_M,
            });
        }
        Ok(Self {
            enabled: true,
            radius_meters: Some(radius_meters),
        })
    }

    /// Whether the public point is displaced.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The blur radius, only present when enabled.
    #[must_use]
    pub fn radius_meters(&self) -> Option<u32> {
        self.enabled
            .then(|| self.radius_meters.unwrap_or(DEFAULT_BLUR_RADIUS_M))
    }
}

/// The exact and public location of one photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoLocationPair {
    exact: GeoPoint,
    public: GeoPoint,
}

impl PhotoLocationPair {
    /// Computes the pair for a new photo, drawing the public point once.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] if `exact` is not valid.
    pub fn create<R: Rng + ?Sized>(exact: GeoPoint, settings: &BlurSettings, rng: &mut R) -> Result<Self> {
        let public = match settings.radius_meters() {
            Some(radius) => random_offset_point(&exact, f64::from(radius), rng)?,
            None if exact.is_valid() => exact,
            None => {
                return Err(GeoError::InvalidCoordinate(format!("photo location {exact} is out of range")));
            }
        };
        Ok(Self { exact, public })
    }

    /// Rebuilds a pair read back from storage, without drawing anything.
    #[must_use]
    pub const fn from_stored(exact: GeoPoint, public: GeoPoint) -> Self {
        Self { exact, public }
    }

    /// Ground truth location, restricted to owner and moderators.
    #[must_use]
    pub fn exact(&self) -> GeoPoint {
        self.exact
    }

    /// Location safe to show anyone.
    #[must_use]
    pub fn public(&self) -> GeoPoint {
        self.public
    }
}
