//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::GeoPoint;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two points in meters.
///
/// Exactly symmetric (`distance_meters(a, b) == distance_meters(b, a)`, bit for
/// bit) and zero for identical points.
///
/// # Example
/// ```
/// use photospot_geo::{distance_meters, GeoPoint};
///
/// let berlin = GeoPoint::new(13.4050, 52.5200);
/// let paris = GeoPoint::new(2.3522, 48.8566);
///
/// let distance = distance_meters(&berlin, &paris);
/// assert!((distance - 878_000.0).abs() < 10_000.0);
/// ```
#[inline]
#[must_use]
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_with_radius(a, b, EARTH_RADIUS_M)
}

/// Calculates the great-circle distance between two points in kilometers.
#[inline]
#[must_use]
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_with_radius(a, b, EARTH_RADIUS_KM)
}

#[inline]
fn haversine_with_radius(a: &GeoPoint, b: &GeoPoint, radius: f64) -> f64 {
    // Fixed evaluation order keeps the result independent of argument order.
    let (from, to) = if (b.lat, b.lon) < (a.lat, a.lon) { (b, a) } else { (a, b) };

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    // Rounding can push h just past 1 for antipodal points.
    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2)).clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Test data: known distances between cities
    const BERLIN: GeoPoint = GeoPoint::new(13.4050, 52.5200);
    const PARIS: GeoPoint = GeoPoint::new(2.3522, 48.8566);
    const NEW_YORK: GeoPoint = GeoPoint::new(-74.0060, 40.7128);
    const TOKYO: GeoPoint = GeoPoint::new(139.6503, 35.6762);

    #[test]
    fn test_berlin_to_paris() {
        let distance = distance_km(&BERLIN, &PARIS);
        // Expected: ~878 km
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let distance = distance_km(&NEW_YORK, &TOKYO);
        // Expected: ~10,838 km
        assert!((distance - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_meters(&BERLIN, &BERLIN), 0.0);
    }

    #[test]
    fn test_antimeridian_is_short() {
        let west = GeoPoint::new(179.999, 0.0);
        let east = GeoPoint::new(-179.999, 0.0);
        // 0.002 degrees of longitude at the equator
        assert!(distance_meters(&west, &east) < 250.0);
    }

    #[test]
    fn test_antipodes_are_half_circumference() {
        let a = GeoPoint::new(88.641_448_056_521_26, -71.598_269_074_795_11);
        let b = GeoPoint::new(-91.358_551_943_478_74, 71.598_269_074_795_11);
        let half = std::f64::consts::PI * EARTH_RADIUS_M;

        let distance = distance_meters(&a, &b);
        assert!(distance.is_finite());
        assert!(distance <= half);
        assert!((half - distance) < 1.0, "got {distance}");

        let pole = distance_meters(&GeoPoint::new(0.0, 90.0), &GeoPoint::new(0.0, -90.0));
        assert!(pole.is_finite() && pole <= half);
    }

    #[test]
    fn test_meters_conversion() {
        let km = distance_km(&BERLIN, &PARIS);
        let meters = distance_meters(&BERLIN, &PARIS);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    fn any_point() -> impl Strategy<Value = GeoPoint> {
        (-180.0f64..=180.0, -90.0f64..=90.0).prop_map(|(lon, lat)| GeoPoint::new(lon, lat))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in any_point(), b in any_point()) {
            prop_assert_eq!(distance_meters(&a, &b), distance_meters(&b, &a));
        }

        #[test]
        fn prop_antipode_is_finite(a in any_point()) {
            let antipode = GeoPoint::new(if a.lon > 0.0 { a.lon - 180.0 } else { a.lon + 180.0 }, -a.lat);
            let d = distance_meters(&a, &antipode);
            prop_assert!(d.is_finite());
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M);
        }

        #[test]
        fn prop_reflexive(a in any_point()) {
            prop_assert_eq!(distance_meters(&a, &a), 0.0);
        }

        #[test]
        fn prop_bounded_by_half_circumference(a in any_point(), b in any_point()) {
            let d = distance_meters(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
        }
    }
}
