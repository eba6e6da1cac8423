//! Page shaping for listing responses.

use photospot_core::config::CountPolicy;
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 200;

/// Largest page a caller may request.
pub const MAX_LIMIT: u32 = 200;

/// How precisely the store should count matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Full count of matching rows
    Exact,
    /// Planner estimate; cheap but may drift
    Estimated,
}

impl CountMode {
    /// Counting strategy for a page starting at `offset`.
    ///
    /// ```
    /// use photospot_core::config::CountPolicy;
    /// use photospot_query::CountMode;
    ///
    /// assert_eq!(CountMode::for_offset(0, CountPolicy::FirstPage), CountMode::Exact);
    /// assert_eq!(CountMode::for_offset(50, CountPolicy::FirstPage), CountMode::Estimated);
    /// assert_eq!(CountMode::for_offset(50, CountPolicy::Always), CountMode::Exact);
    /// ```
    #[must_use]
    pub fn for_offset(offset: u64, policy: CountPolicy) -> Self {
        match policy {
            CountPolicy::Always => CountMode::Exact,
            CountPolicy::FirstPage if offset == 0 => CountMode::Exact,
            CountPolicy::FirstPage => CountMode::Estimated,
        }
    }
}

/// `meta` block of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Matching rows, exact or estimated
    pub total: u64,
    /// Page size used
    pub limit: u32,
    /// Rows skipped
    pub offset: u64,
    /// `offset + limit < total`
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the block, deriving `has_more`.
    ///
    /// ```
    /// use photospot_query::PaginationMeta;
    ///
    /// assert!(!PaginationMeta::new(250, 50, 200).has_more);
    /// assert!(PaginationMeta::new(250, 50, 100).has_more);
    /// ```
    #[must_use]
    pub fn new(total: u64, limit: u32, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(u64::from(limit)) < total,
        }
    }

    /// Builds the block from a possibly estimated total and the rows actually returned.
    ///
    /// A short, non-empty page proves where the result set ends, and a
    /// non-empty page cannot end beyond the total. An empty page proves nothing.
    /// Without any total, a full page is taken to mean more rows may follow.
    #[must_use]
    pub fn reconcile(total: Option<u64>, limit: u32, offset: u64, returned: usize) -> Self {
        let returned = returned as u64;
        let seen = offset.saturating_add(returned);
        let Some(total) = total else {
            return Self {
                total: seen,
                limit,
                offset,
                has_more: returned > 0 && returned >= u64::from(limit),
            };
        };
        let total = if returned == 0 {
            total
        } else if returned < u64::from(limit) {
            seen
        } else {
            total.max(seen)
        };
        Self::new(total, limit, offset)
    }
}

/// A page of rows plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Rows on this page
    pub data: Vec<T>,
    /// Counting metadata
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Wrap rows with metadata.
    #[must_use]
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }

    /// Transform each row, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
