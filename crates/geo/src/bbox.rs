//! Axis-aligned bounding boxes in longitude/latitude degrees.
//!
//! A box is either valid or it does not exist: construction rejects boxes
//! that are out of range or inverted instead of clamping or reordering them.
//! Range checks are inclusive, ordering checks are strict.

use crate::{GeoError, GeoPoint, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule a candidate bounding box breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BboxViolation {
    /// A value is NaN or infinite
    NonFinite,
    /// `min_lon` or `max_lon` outside [-180, 180]
    LongitudeOutOfRange,
    /// `min_lat` or `max_lat` outside [-90, 90]
    LatitudeOutOfRange,
    /// `min_lon >= max_lon`
    LongitudeOrder,
    /// `min_lat >= max_lat`
    LatitudeOrder,
}

impl BboxViolation {
    /// Machine-readable rule code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonFinite => "NOT_FINITE",
            Self::LongitudeOutOfRange | Self::LatitudeOutOfRange => "RANGE",
            Self::LongitudeOrder | Self::LatitudeOrder => "ORDER",
        }
    }

    /// Human-readable description of the rule.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::NonFinite => "all four values must be finite numbers",
            Self::LongitudeOutOfRange => "longitude values must be between -180 and 180",
            Self::LatitudeOutOfRange => "latitude values must be between -90 and 90",
            Self::LongitudeOrder => "min_lon must be less than max_lon",
            Self::LatitudeOrder => "min_lat must be less than max_lat",
        }
    }
}

impl fmt::Display for BboxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A validated map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 4]", try_from = "[f64; 4]")]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// The whole world, `-180,-90,180,90`.
    pub const WORLD: BoundingBox = BoundingBox {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    /// Builds a box, rejecting it as a whole if any rule is broken.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidBoundingBox`] listing every violated rule.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        let violations = Self::violations(min_lon, min_lat, max_lon, max_lat);
        if violations.is_empty() {
            Ok(Self {
                min_lon,
                min_lat,
                max_lon,
                max_lat,
            })
        } else {
            Err(GeoError::InvalidBoundingBox(violations))
        }
    }

    /// Every rule the candidate breaks, in check order.
    ///
    /// Non-finite input short-circuits: range and ordering are meaningless
    /// for NaN.
    #[must_use]
    pub fn violations(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Vec<BboxViolation> {
        if ![min_lon, min_lat, max_lon, max_lat].iter().all(|v| v.is_finite()) {
            return vec![BboxViolation::NonFinite];
        }

        let lon_range = -180.0..=180.0;
        let lat_range = -90.0..=90.0;
        let mut violations = Vec::new();

        if !lon_range.contains(&min_lon) || !lon_range.contains(&max_lon) {
            violations.push(BboxViolation::LongitudeOutOfRange);
        }
        if !lat_range.contains(&min_lat) || !lat_range.contains(&max_lat) {
            violations.push(BboxViolation::LatitudeOutOfRange);
        }
        if min_lon >= max_lon {
            violations.push(BboxViolation::LongitudeOrder);
        }
        if min_lat >= max_lat {
            violations.push(BboxViolation::LatitudeOrder);
        }

        violations
    }

    /// Western edge.
    #[must_use]
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Southern edge.
    #[must_use]
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Eastern edge.
    #[must_use]
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Northern edge.
    #[must_use]
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// Whether `point` lies inside the box; edges count as inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = GeoError;

    fn try_from([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Result<Self> {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_box() {
        let bbox = BoundingBox::new(-122.5, 37.7, -122.3, 37.9).unwrap();
        assert_eq!(bbox.to_array(), [-122.5, 37.7, -122.3, 37.9]);
    }

    #[test]
    fn test_world_extents_are_valid() {
        assert_eq!(BoundingBox::new(-180.0, -90.0, 180.0, 90.0).unwrap(), BoundingBox::WORLD);
    }

    #[test]
    fn test_inverted_longitude_rejected() {
        let err = BoundingBox::new(-122.3, 37.7, -122.5, 37.9).unwrap_err();
        assert_eq!(err, GeoError::InvalidBoundingBox(vec![BboxViolation::LongitudeOrder]));
    }

    #[test]
    fn test_degenerate_box_rejected() {
        let violations = BoundingBox::violations(10.0, 10.0, 10.0, 10.0);
        assert_eq!(violations, vec![BboxViolation::LongitudeOrder, BboxViolation::LatitudeOrder]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let violations = BoundingBox::violations(200.0, 0.0, 210.0, 10.0);
        assert_eq!(violations, vec![BboxViolation::LongitudeOutOfRange]);

        let violations = BoundingBox::violations(0.0, -95.0, 10.0, 10.0);
        assert_eq!(violations, vec![BboxViolation::LatitudeOutOfRange]);
    }

    #[test]
    fn test_non_finite_short_circuits() {
        let violations = BoundingBox::violations(f64::NAN, 0.0, 10.0, 10.0);
        assert_eq!(violations, vec![BboxViolation::NonFinite]);
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(bbox.contains(&GeoPoint::new(5.0, 5.0)));
        assert!(bbox.contains(&GeoPoint::new(0.0, 10.0)));
        assert!(!bbox.contains(&GeoPoint::new(10.000_001, 5.0)));
        assert!(!bbox.contains(&GeoPoint::new(5.0, -0.1)));
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let bbox = BoundingBox::new(-1.0, -2.0, 3.0, 4.0).unwrap();
        assert_eq!(serde_json::to_string(&bbox).unwrap(), "[-1.0,-2.0,3.0,4.0]");
        assert!(serde_json::from_str::<BoundingBox>("[3.0,-2.0,-1.0,4.0]").is_err());
    }

    #[test]
    fn test_display_matches_query_syntax() {
        let bbox = BoundingBox::new(-122.5, 37.7, -122.3, 37.9).unwrap();
        assert_eq!(bbox.to_string(), "-122.5,37.7,-122.3,37.9");
    }
}
