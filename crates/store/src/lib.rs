//! Photo and profile storage for PhotoSpot
//!
//! The request service talks to a [`PhotoStore`]. Two implementations ship:
//!
//! - [`SupabaseStore`]: PostgREST over HTTP, counting rows through
//!   `Prefer: count=...` and `Content-Range`
//! - [`MemoryStore`]: rows behind an async lock, same listing semantics
//!
//! # Example
//!
//! ```rust,no_run
//! use photospot_core::config::StoreSettings;
//! use photospot_query::{CountMode, PhotoFilterSet, RawPhotoQuery};
//! use photospot_store::{PhotoStore, SupabaseStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SupabaseStore::new(StoreSettings::local().with_anon_key("public-anon-key"))?;
//!
//!     let raw = RawPhotoQuery::from_pairs([("bbox", "-122.52,37.70,-122.35,37.83")]);
//!     let filters = PhotoFilterSet::parse(&raw)?;
//!     let page = store.list_photos(&filters, CountMode::Exact).await?;
//!     println!("{} photos, total {:?}", page.items.len(), page.total);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod memory;
pub mod postgrest;
pub mod repository;
pub mod rows;

pub use client::SupabaseStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::{ListingPage, PhotoStore};
pub use rows::NewPhoto;
