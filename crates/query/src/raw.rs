//! Untyped listing input as it arrives from a query string or JSON body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw parameter value.
///
/// Query strings only ever produce [`QueryValue::Text`]; JSON callers may
/// send native booleans and numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// `true` / `false`
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Any other number
    Float(f64),
    /// Text, untrimmed
    Text(String),
}

impl QueryValue {
    /// Whether this counts as "not supplied" (`?limit=`).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, QueryValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(b) => write!(f, "{b}"),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(x) => write!(f, "{x}"),
            QueryValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

/// Raw parameters of `GET /photos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPhotoQuery {
    /// `minLon,minLat,maxLon,maxLat`
    pub bbox: Option<QueryValue>,
    /// Category filter
    pub category: Option<QueryValue>,
    /// Season filter
    pub season: Option<QueryValue>,
    /// Time-of-day filter
    pub time_of_day: Option<QueryValue>,
    /// Only photos by photographer accounts
    pub photographer_only: Option<QueryValue>,
    /// Page size
    pub limit: Option<QueryValue>,
    /// Rows to skip
    pub offset: Option<QueryValue>,
}

impl RawPhotoQuery {
    /// Collect decoded query-string pairs.
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    ///
    /// ```
    /// use photospot_query::{QueryValue, RawPhotoQuery};
    ///
    /// let raw = RawPhotoQuery::from_pairs([("limit", "50"), ("limit", "10"), ("utm_source", "x")]);
    /// assert_eq!(raw.limit, Some(QueryValue::from("50")));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "bbox" => &mut raw.bbox,
                "category" => &mut raw.category,
                "season" => &mut raw.season,
                "time_of_day" => &mut raw.time_of_day,
                "photographer_only" => &mut raw.photographer_only,
                "limit" => &mut raw.limit,
                "offset" => &mut raw.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(QueryValue::Text(value.into()));
            }
        }
        raw
    }
}
