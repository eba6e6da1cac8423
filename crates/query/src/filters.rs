//! Normalized listing filters.
//!
//! Parsing is strict for enums, the bounding box and explicit out-of-range
//! numbers, and lenient in exactly two places: a `limit`/`offset` that is not
//! a number at all falls back to its default, and an unrecognized
//! `photographer_only` string means "no filter".

use crate::bbox::collect_bbox;
use crate::pagination::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::raw::{QueryValue, RawPhotoQuery};
use crate::taxonomy::{Category, Season, TimeOfDay, UnknownValue};
use photospot_core::validation::{FieldError, ValidationFailure, ValidationResult};
use photospot_geo::{BoundingBox, GeoPoint};
use serde::Serialize;
use std::str::FromStr;

/// What a listing row exposes to filtering.
///
/// Only the public location is reachable here, so a filter can never leak
/// whether an exact point lies inside a viewport.
pub trait ListingCandidate {
    /// Displayed location
    fn public_location(&self) -> GeoPoint;
    /// Content category
    fn category(&self) -> Option<Category>;
    /// Season taken
    fn season(&self) -> Option<Season>;
    /// Light conditions
    fn time_of_day(&self) -> Option<TimeOfDay>;
    /// Whether the owner holds the photographer role
    fn by_photographer(&self) -> bool;
}

/// Validated filters for one listing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoFilterSet {
    bbox: Option<BoundingBox>,
    category: Option<Category>,
    season: Option<Season>,
    time_of_day: Option<TimeOfDay>,
    photographer_only: Option<bool>,
    limit: u32,
    offset: u64,
}

impl Default for PhotoFilterSet {
    fn default() -> Self {
        Self {
            bbox: None,
            category: None,
            season: None,
            time_of_day: None,
            photographer_only: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PhotoFilterSet {
    /// Validate raw parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] naming every offending field.
    ///
    /// ```
    /// use photospot_query::{PhotoFilterSet, RawPhotoQuery};
    ///
    /// let filters = PhotoFilterSet::parse(&RawPhotoQuery::default()).unwrap();
    /// assert_eq!((filters.limit(), filters.offset()), (200, 0));
    ///
    /// let raw = RawPhotoQuery::from_pairs([("limit", "201"), ("season", "monsoon")]);
    /// let failure = PhotoFilterSet::parse(&raw).unwrap_err();
    /// assert_eq!(failure.fields(), vec!["season", "limit"]);
    /// ```
    pub fn parse(raw: &RawPhotoQuery) -> Result<Self, ValidationFailure> {
        let mut result = ValidationResult::new();

        let bbox = match supplied(raw.bbox.as_ref()) {
            Some(QueryValue::Text(text)) => collect_bbox(text, &mut result),
            Some(other) => {
                result.add_error(
                    FieldError::new("bbox", "INVALID_FORMAT", "expected minLon,minLat,maxLon,maxLat")
                        .actual(other.to_string()),
                );
                None
            }
            None => None,
        };

        let category = parse_member::<Category>(raw.category.as_ref(), Category::FIELD, Category::VALUES, &mut result);
        let season = parse_member::<Season>(raw.season.as_ref(), Season::FIELD, Season::VALUES, &mut result);
        let time_of_day =
            parse_member::<TimeOfDay>(raw.time_of_day.as_ref(), TimeOfDay::FIELD, TimeOfDay::VALUES, &mut result);
        let photographer_only = coerce_flag(raw.photographer_only.as_ref());
        let limit = parse_limit(raw.limit.as_ref(), &mut result);
        let offset = parse_offset(raw.offset.as_ref(), &mut result);

        result.into_result()?;

        Ok(Self {
            bbox,
            category,
            season,
            time_of_day,
            photographer_only,
            limit,
            offset,
        })
    }

    /// Viewport restriction
    #[must_use]
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Category restriction
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Season restriction
    #[must_use]
    pub fn season(&self) -> Option<Season> {
        self.season
    }

    /// Time-of-day restriction
    #[must_use]
    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        self.time_of_day
    }

    /// Photographer flag; `None` and `Some(false)` both mean unrestricted
    #[must_use]
    pub fn photographer_only(&self) -> Option<bool> {
        self.photographer_only
    }

    /// Page size, always within 1..=200
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows skipped
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether a public location falls in the requested viewport.
    #[must_use]
    pub fn admits_location(&self, public: &GeoPoint) -> bool {
        self.bbox.as_ref().is_none_or(|bbox| bbox.contains(public))
    }

    /// Whether a listing row passes every filter.
    pub fn matches<C: ListingCandidate + ?Sized>(&self, candidate: &C) -> bool {
        fn wanted<T: PartialEq>(filter: Option<T>, actual: Option<T>) -> bool {
            filter.is_none() || filter == actual
        }

        self.admits_location(&candidate.public_location())
            && wanted(self.category, candidate.category())
            && wanted(self.season, candidate.season())
            && wanted(self.time_of_day, candidate.time_of_day())
            && (self.photographer_only != Some(true) || candidate.by_photographer())
    }
}

/// A value counts as supplied unless it is absent or blank text.
fn supplied(value: Option<&QueryValue>) -> Option<&QueryValue> {
    value.filter(|v| !v.is_blank())
}

fn parse_member<T>(
    value: Option<&QueryValue>,
    field: &str,
    allowed: &[&str],
    result: &mut ValidationResult,
) -> Option<T>
where
    T: FromStr<Err = UnknownValue>,
{
    let value = supplied(value)?;
    let parsed = match value {
        QueryValue::Text(text) => text.parse::<T>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        result.add_error(
            FieldError::new(field, "ONE_OF", format!("must be one of: {}", allowed.join(", ")))
                .expected(allowed.join(", "))
                .actual(value.to_string()),
        );
    }
    parsed
}

/// `true`/`false` as booleans or exact strings; anything else is no filter.
fn coerce_flag(value: Option<&QueryValue>) -> Option<bool> {
    match value? {
        QueryValue::Bool(flag) => Some(*flag),
        QueryValue::Text(text) if text == "true" => Some(true),
        QueryValue::Text(text) if text == "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    /// Not a number at all; callers fall back to their default
    Malformed,
    /// Whole, possibly far outside any accepted range
    Integer(i128),
    Fractional(f64),
}

fn read_number(value: &QueryValue) -> Number {
    match value {
        QueryValue::Int(n) => Number::Integer(i128::from(*n)),
        QueryValue::Float(x) => classify(*x),
        QueryValue::Text(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i128>() {
                Number::Integer(n)
            } else if let Ok(x) = text.parse::<f64>() {
                classify(x)
            } else {
                Number::Malformed
            }
        }
        QueryValue::Bool(_) => Number::Malformed,
    }
}

// Whole floats beyond i128 saturate; they are out of range either way.
#[allow(clippy::cast_possible_truncation)]
fn classify(x: f64) -> Number {
    if !x.is_finite() {
        Number::Malformed
    } else if x.fract() == 0.0 {
        Number::Integer(x as i128)
    } else {
        Number::Fractional(x)
    }
}

fn not_integer(field: &str, x: f64) -> FieldError {
    FieldError::new(field, "NOT_INTEGER", "must be a whole number")
        .expected("integer")
        .actual(x.to_string())
}

fn parse_limit(value: Option<&QueryValue>, result: &mut ValidationResult) -> u32 {
    let Some(value) = supplied(value) else {
        return DEFAULT_LIMIT;
    };
    match read_number(value) {
        Number::Malformed => DEFAULT_LIMIT,
        Number::Integer(n) => match u32::try_from(n) {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => limit,
            _ => {
                result.add_error(
                    FieldError::new("limit", "RANGE", format!("must be between 1 and {MAX_LIMIT}"))
                        .expected(format!("1 - {MAX_LIMIT}"))
                        .actual(n.to_string()),
                );
                DEFAULT_LIMIT
            }
        },
        Number::Fractional(x) => {
            result.add_error(not_integer("limit", x));
            DEFAULT_LIMIT
        }
    }
}

fn parse_offset(value: Option<&QueryValue>, result: &mut ValidationResult) -> u64 {
    let Some(value) = supplied(value) else {
        return 0;
    };
    match read_number(value) {
        Number::Malformed => 0,
        Number::Integer(n) => u64::try_from(n).unwrap_or_else(|_| {
            let error = if n < 0 {
                FieldError::new("offset", "RANGE", "must be zero or greater").expected(">= 0")
            } else {
                FieldError::new("offset", "RANGE", format!("must be at most {}", u64::MAX))
                    .expected(format!("<= {}", u64::MAX))
            };
            result.add_error(error.actual(n.to_string()));
            0
        }),
        Number::Fractional(x) => {
            result.add_error(not_integer("offset", x));
            0
        }
    }
}
