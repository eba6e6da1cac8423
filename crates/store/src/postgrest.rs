//! PostgREST query dialect.
//!
//! Translates a [`PhotoFilterSet`] into horizontal filters on the listing
//! view and reads the row count back out of `Content-Range`.

use crate::error::{StoreError, StoreResult};
use photospot_query::{CountMode, PhotoFilterSet};

/// Columns selected from the listing view. The view exposes the public point
/// only, as two plain numeric columns.
pub const LISTING_COLUMNS: &str =
    "id,owner_id,title,image_url,thumbnail_url,category,season,time_of_day,public_lon,public_lat,created_at";

/// Columns selected for a photo detail.
pub const PHOTO_COLUMNS: &str = "id,owner_id,title,description,image_url,thumbnail_url,category,season,\
time_of_day,location_exact,location_public,blur_location,blur_radius,exif,status,created_at";

/// Columns selected for a profile.
pub const PROFILE_COLUMNS: &str =
    "id,username,display_name,bio,avatar_url,role,company_name,website_url,social_links,created_at";

/// Query pairs for one listing page.
///
/// ```
/// use photospot_query::{PhotoFilterSet, RawPhotoQuery};
/// use photospot_store::postgrest::listing_params;
///
/// let raw = RawPhotoQuery::from_pairs([("season", "winter"), ("limit", "20")]);
/// let params = listing_params(&PhotoFilterSet::parse(&raw).unwrap());
/// assert!(params.contains(&("season".to_string(), "eq.winter".to_string())));
/// assert!(params.contains(&("limit".to_string(), "20".to_string())));
/// ```
#[must_use]
pub fn listing_params(filters: &PhotoFilterSet) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), LISTING_COLUMNS.to_string()),
        ("status".to_string(), "eq.approved".to_string()),
    ];

    if let Some(bbox) = filters.bbox() {
        params.push(("public_lon".to_string(), format!("gte.{}", bbox.min_lon())));
        params.push(("public_lon".to_string(), format!("lte.{}", bbox.max_lon())));
        params.push(("public_lat".to_string(), format!("gte.{}", bbox.min_lat())));
        params.push(("public_lat".to_string(), format!("lte.{}", bbox.max_lat())));
    }
    if let Some(category) = filters.category() {
        params.push(("category".to_string(), format!("eq.{category}")));
    }
    if let Some(season) = filters.season() {
        params.push(("season".to_string(), format!("eq.{season}")));
    }
    if let Some(time_of_day) = filters.time_of_day() {
        params.push(("time_of_day".to_string(), format!("eq.{time_of_day}")));
    }
    if filters.photographer_only() == Some(true) {
        params.push(("owner_role".to_string(), "eq.photographer".to_string()));
    }

    params.push(("order".to_string(), "created_at.desc".to_string()));
    params.push(("limit".to_string(), filters.limit().to_string()));
    params.push(("offset".to_string(), filters.offset().to_string()));
    params
}

/// `Prefer` header value asking for a row count.
#[must_use]
pub fn prefer_count(mode: CountMode) -> &'static str {
    match mode {
        CountMode::Exact => "count=exact",
        CountMode::Estimated => "count=estimated",
    }
}

/// Total from a `Content-Range` header: `0-49/250`, `*/0`, or `0-49/*`
/// when the server did not count.
///
/// # Errors
///
/// Returns [`StoreError::ContentRange`] if the header is not in one of those shapes.
pub fn parse_content_range(header: &str) -> StoreResult<Option<u64>> {
    let malformed = || StoreError::ContentRange(header.to_string());

    let (range, total) = header.trim().split_once('/').ok_or_else(malformed)?;
    if range != "*" {
        let (start, end) = range.split_once('-').ok_or_else(malformed)?;
        let start: u64 = start.parse().map_err(|_| malformed())?;
        let end: u64 = end.parse().map_err(|_| malformed())?;
        if start > end {
            return Err(malformed());
        }
    }

    match total {
        "*" => Ok(None),
        n => n.parse().map(Some).map_err(|_| malformed()),
    }
}
