//! Listing query check

use super::{header, print_json, report};
use crate::Format;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use photospot_query::{PhotoFilterSet, RawPhotoQuery};
use photospot_service::ServiceError;
use reqwest::Url;

/// Decode a query string the way the HTTP layer would.
///
/// A leading `?` is accepted; percent-encoding and `+` are decoded.
pub fn decode(query: &str) -> Result<RawPhotoQuery> {
    let query = query.trim().trim_start_matches('?');
    let url = Url::parse(&format!("http://localhost/photos?{query}")).context("Malformed query string")?;
    Ok(RawPhotoQuery::from_pairs(url.query_pairs()))
}

/// Parse and print the filters a query string resolves to.
pub fn run(query: &str, format: Format) -> Result<()> {
    let raw = decode(query)?;
    let filters = match PhotoFilterSet::parse(&raw) {
        Ok(filters) => filters,
        Err(failure) => return report(&ServiceError::from(failure), format),
    };

    match format {
        Format::Json => print_json(&filters),
        Format::Text => {
            header("Listing filters");
            match filters.bbox() {
                Some(bbox) => println!("  bbox:              {}", format!("{:?}", bbox.to_array()).green()),
                None => println!("  bbox:              {}", "any".dimmed()),
            }
            print_member("category", filters.category().map(|c| c.to_string()));
            print_member("season", filters.season().map(|s| s.to_string()));
            print_member("time_of_day", filters.time_of_day().map(|t| t.to_string()));
            print_member("photographer_only", filters.photographer_only().map(|p| p.to_string()));
            println!("  limit:             {}", filters.limit());
            println!("  offset:            {}", filters.offset());
            println!();
            Ok(())
        }
    }
}

fn print_member(name: &str, value: Option<String>) {
    let label = format!("{name}:");
    match value {
        Some(value) => println!("  {label:<19}{}", value.green()),
        None => println!("  {label:<19}{}", "any".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photospot_query::QueryValue;

    #[test]
    fn test_decode_percent_encoded_pairs() {
        let raw = decode("?bbox=-122.5%2C37.7%2C-122.3%2C37.8&category=street&limit=20").unwrap();
        assert_eq!(raw.bbox, Some(QueryValue::from("-122.5,37.7,-122.3,37.8")));
        assert_eq!(raw.category, Some(QueryValue::from("street")));

        let filters = PhotoFilterSet::parse(&raw).unwrap();
        assert_eq!(filters.limit(), 20);
        assert!(filters.bbox().is_some());
    }

    #[test]
    fn test_decode_empty_query() {
        let raw = decode("").unwrap();
        assert_eq!(raw, RawPhotoQuery::default());
    }
}
