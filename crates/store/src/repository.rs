//! The storage seam the request service is written against.

use crate::error::StoreResult;
use crate::rows::NewPhoto;
use async_trait::async_trait;
use photospot_policy::{PhotoListItem, PhotoRecord, ProfileRecord};
use photospot_query::{CountMode, PhotoFilterSet};
use uuid::Uuid;

/// One page of approved photos.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// Rows in store order (newest first)
    pub items: Vec<PhotoListItem>,
    /// Matching rows, when the store counted
    pub total: Option<u64>,
}

/// Photo and profile persistence.
///
/// Listing only ever returns approved photos and filters on the public
/// location; visibility of individual records is decided by the caller.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Approved photos matching `filters`, counted as `count` asks.
    async fn list_photos(&self, filters: &PhotoFilterSet, count: CountMode) -> StoreResult<ListingPage>;

    /// A photo regardless of status, or `None` if no row has this id.
    ///
    /// Backends behind row-level security must read with a role that sees
    /// every status.
    async fn get_photo(&self, id: Uuid) -> StoreResult<Option<PhotoRecord>>;

    /// Persist an upload as pending.
    async fn insert_photo(&self, photo: NewPhoto) -> StoreResult<PhotoRecord>;

    /// A profile, or `None` if no row has this id.
    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<ProfileRecord>>;
}
