//! Supabase PostgREST adapter

use crate::error::{StoreError, StoreResult};
use crate::postgrest::{listing_params, parse_content_range, prefer_count, PHOTO_COLUMNS, PROFILE_COLUMNS};
use crate::repository::{ListingPage, PhotoStore};
use crate::rows::{ListingRow, NewPhoto, PhotoInsertRow, PhotoRow};
use async_trait::async_trait;
use photospot_core::config::StoreSettings;
use photospot_policy::{PhotoListItem, PhotoRecord, ProfileRecord};
use photospot_query::{CountMode, PhotoFilterSet};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// PostgREST `Prefer` header
const PREFER: &str = "Prefer";

/// Store backed by a Supabase project's REST endpoint.
///
/// Every request carries the `apikey` and bearer headers from
/// [`StoreSettings`] plus a fresh `X-Request-ID`. Failures are returned as-is;
/// nothing here retries.
///
/// Visibility is decided by the service layer, so the store needs the
/// `service_role_key` to read rows that row-level security hides from the
/// anon role. With only an anon key, pending and rejected photos are
/// invisible even to their owners and `get_photo` reports them as missing.
#[derive(Clone)]
pub struct SupabaseStore {
    inner: Client,
    settings: Arc<StoreSettings>,
}

impl SupabaseStore {
    /// Build a client from settings.
    ///
    /// # Errors
    ///
    /// Fails if the URL is empty, a key is not a valid header value, or the
    /// HTTP client cannot be built.
    pub fn new(settings: StoreSettings) -> StoreResult<Self> {
        if settings.rest_url.trim().is_empty() {
            return Err(StoreError::config("rest_url cannot be empty"));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(concat!("photospot-store/", env!("CARGO_PKG_VERSION"))));

        if let Some(key) = settings.anon_key.as_deref().or(settings.service_role_key.as_deref()) {
            let value = HeaderValue::from_str(key).map_err(|_| StoreError::config("API key is not a valid header value"))?;
            default_headers.insert(APIKEY_HEADER, value);
        }
        if let Some(token) = settings.bearer_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| StoreError::config("bearer token is not a valid header value"))?;
            default_headers.insert(AUTHORIZATION, value);
        }

        if !settings.reads_all_rows() {
            warn!("No service_role_key set; non-approved photos will be unreadable");
        }

        let inner = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(StoreError::Request)?;

        Ok(Self {
            inner,
            settings: Arc::new(settings),
        })
    }

    /// Settings in use
    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Absolute URL of a table or view
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.settings.rest_url.trim_end_matches('/'), table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.inner.request(method, self.table_url(table))
    }

    /// Send with a correlation id; non-success statuses become errors.
    async fn send(&self, request: RequestBuilder, operation: &'static str) -> StoreResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let response = request.header(X_REQUEST_ID, &request_id).send().await.map_err(|e| {
            warn!(request_id = %request_id, operation, error = %e, "Store request failed");
            StoreError::Request(e)
        })?;

        let status = response.status();
        debug!(
            request_id = %request_id,
            operation,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Store responded"
        );

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!(request_id = %request_id, operation, status = status.as_u16(), "Store rejected request");
            Err(StoreError::response(status.as_u16(), message))
        }
    }

    async fn rows<T: DeserializeOwned>(response: Response) -> StoreResult<Vec<T>> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PhotoStore for SupabaseStore {
    #[instrument(skip(self, filters), fields(limit = filters.limit(), offset = filters.offset()))]
    async fn list_photos(&self, filters: &PhotoFilterSet, count: CountMode) -> StoreResult<ListingPage> {
        let request = self
            .request(Method::GET, &self.settings.listings_view)
            .query(&listing_params(filters))
            .header(PREFER, prefer_count(count));

        let response = self.send(request, "list_photos").await?;
        let total = match response.headers().get(CONTENT_RANGE) {
            Some(value) => {
                let text = value.to_str().map_err(|_| StoreError::ContentRange("non-ASCII header".into()))?;
                parse_content_range(text)?
            }
            None => None,
        };

        let items = Self::rows::<ListingRow>(response)
            .await?
            .into_iter()
            .map(PhotoListItem::try_from)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(ListingPage { items, total })
    }

    #[instrument(skip(self))]
    async fn get_photo(&self, id: Uuid) -> StoreResult<Option<PhotoRecord>> {
        let request = self.request(Method::GET, &self.settings.photos_table).query(&[
            ("select", PHOTO_COLUMNS.to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ]);

        let response = self.send(request, "get_photo").await?;
        Self::rows::<PhotoRow>(response)
            .await?
            .into_iter()
            .next()
            .map(PhotoRecord::try_from)
            .transpose()
    }

    #[instrument(skip(self, photo), fields(owner_id = %photo.owner_id))]
    async fn insert_photo(&self, photo: NewPhoto) -> StoreResult<PhotoRecord> {
        let request = self
            .request(Method::POST, &self.settings.photos_table)
            .query(&[("select", PHOTO_COLUMNS)])
            .header(PREFER, "return=representation")
            .json(&PhotoInsertRow::from(&photo));

        let response = self.send(request, "insert_photo").await?;
        let row = Self::rows::<PhotoRow>(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::decode("insert returned no row"))?;
        PhotoRecord::try_from(row)
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<ProfileRecord>> {
        let request = self.request(Method::GET, &self.settings.profiles_table).query(&[
            ("select", PROFILE_COLUMNS.to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ]);

        let response = self.send(request, "get_profile").await?;
        Ok(Self::rows::<ProfileRecord>(response).await?.into_iter().next())
    }
}
