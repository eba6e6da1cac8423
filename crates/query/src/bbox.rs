//! `bbox=minLon,minLat,maxLon,maxLat` parameter parsing.

use photospot_core::validation::{FieldError, ValidationFailure, ValidationResult};
use photospot_geo::BoundingBox;

const FIELD: &str = "bbox";
const SHAPE: &str = "minLon,minLat,maxLon,maxLat";
const COMPONENTS: [&str; 4] = ["min_lon", "min_lat", "max_lon", "max_lat"];

/// Parse a bounding box parameter.
///
/// # Errors
///
/// Returns every problem found, each reported on the `bbox` field.
///
/// ```
/// use photospot_query::parse_bbox;
///
/// let bbox = parse_bbox("-122.5,37.7,-122.3,37.9").unwrap();
/// assert_eq!(bbox.max_lat(), 37.9);
///
/// let failure = parse_bbox("10,0,5,1").unwrap_err();
/// assert!(failure.has_field("bbox"));
/// ```
pub fn parse_bbox(input: &str) -> Result<BoundingBox, ValidationFailure> {
    let mut result = ValidationResult::new();
    match collect_bbox(input, &mut result) {
        Some(bbox) => Ok(bbox),
        None => Err(ValidationFailure { errors: result.errors().to_vec() }),
    }
}

/// Parse into `result`, returning the box only when no problem was found.
pub(crate) fn collect_bbox(input: &str, result: &mut ValidationResult) -> Option<BoundingBox> {
    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    if tokens.len() != 4 {
        result.add_error(
            FieldError::new(FIELD, "INVALID_FORMAT", format!("expected four comma-separated numbers {SHAPE}"))
                .expected(SHAPE)
                .actual(input),
        );
        return None;
    }

    let mut values = [0.0_f64; 4];
    let mut malformed = false;
    for ((slot, token), name) in values.iter_mut().zip(&tokens).zip(COMPONENTS) {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => *slot = value,
            _ => {
                result.add_error(
                    FieldError::new(FIELD, "INVALID_NUMBER", format!("{name} is not a finite number"))
                        .expected("finite number")
                        .actual(*token),
                );
                malformed = true;
            }
        }
    }
    if malformed {
        return None;
    }

    let [min_lon, min_lat, max_lon, max_lat] = values;
    let violations = BoundingBox::violations(min_lon, min_lat, max_lon, max_lat);
    if violations.is_empty() {
        return BoundingBox::new(min_lon, min_lat, max_lon, max_lat).ok();
    }

    for violation in violations {
        result.add_error(FieldError::new(FIELD, violation.code(), violation.message()).actual(input));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_valid_box() {
        let bbox = parse_bbox("-122.5, 37.7, -122.3, 37.9").unwrap();
        assert_eq!(bbox.to_array(), [-122.5, 37.7, -122.3, 37.9]);
    }

    #[test]
    fn test_world_box_is_accepted() {
        assert!(parse_bbox("-180,-90,180,90").is_ok());
    }

    #[test]
    fn test_wrong_component_count() {
        let failure = parse_bbox("1,2,3").unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].code, "INVALID_FORMAT");

        assert!(parse_bbox("1,2,3,4,5").is_err());
        assert!(parse_bbox("").is_err());
    }

    #[test]
    fn test_non_numeric_components_are_each_reported() {
        let failure = parse_bbox("a,0,b,1").unwrap_err();
        assert_eq!(failure.errors.len(), 2);
        assert!(failure.errors.iter().all(|e| e.code == "INVALID_NUMBER"));
        assert!(failure.errors[0].message.contains("min_lon"));
        assert!(failure.errors[1].message.contains("max_lon"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(parse_bbox("NaN,0,1,1").is_err());
        assert!(parse_bbox("0,0,inf,1").is_err());
    }

    #[test]
    fn test_inverted_box_rejected() {
        let failure = parse_bbox("10,0,5,1").unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].code, "ORDER");
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert!(parse_bbox("5,0,5,1").is_err());
        assert!(parse_bbox("0,3,1,3").is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let failure = parse_bbox("-181,0,10,95").unwrap_err();
        let codes: Vec<&str> = failure.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["RANGE", "RANGE"]);
    }

    proptest! {
        #[test]
        fn prop_accepts_iff_ordered_and_in_range(
            min_lon in -200.0f64..200.0,
            min_lat in -100.0f64..100.0,
            max_lon in -200.0f64..200.0,
            max_lat in -100.0f64..100.0,
        ) {
            let input = format!("{min_lon},{min_lat},{max_lon},{max_lat}");
            let valid = (-180.0..=180.0).contains(&min_lon)
                && (-180.0..=180.0).contains(&max_lon)
                && (-90.0..=90.0).contains(&min_lat)
                && (-90.0..=90.0).contains(&max_lat)
                && min_lon < max_lon
                && min_lat < max_lat;

            prop_assert_eq!(parse_bbox(&input).is_ok(), valid);
        }
    }
}
