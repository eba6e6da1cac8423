//! Listing query contract for the PhotoSpot map.
//!
//! Turns untyped request parameters into a [`PhotoFilterSet`] and shapes
//! the page that comes back:
//!
//! - [`RawPhotoQuery`]: parameters as received, from a query string or JSON
//! - [`PhotoFilterSet::parse`]: validation that reports every bad field at once
//! - [`PaginationMeta`] / [`Paginated`]: the `{ data, meta }` response envelope
//! - [`BlurRequest`]: the location-privacy fields of an upload
//!
//! ```
//! use photospot_query::{PhotoFilterSet, RawPhotoQuery};
//!
//! let raw = RawPhotoQuery::from_pairs([
//!     ("bbox", "-122.52,37.70,-122.35,37.83"),
//!     ("category", "street"),
//!     ("limit", "abc"),
//! ]);
//! let filters = PhotoFilterSet::parse(&raw).unwrap();
//! assert_eq!(filters.limit(), 200);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bbox;
mod filters;
mod pagination;
mod raw;
pub mod taxonomy;
mod upload;

pub use bbox::parse_bbox;
pub use filters::{ListingCandidate, PhotoFilterSet};
pub use pagination::{CountMode, Paginated, PaginationMeta, DEFAULT_LIMIT, MAX_LIMIT};
pub use raw::{QueryValue, RawPhotoQuery};
pub use taxonomy::{Category, Season, TimeOfDay, UnknownValue};
pub use upload::BlurRequest;
