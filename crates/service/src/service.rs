//! Request operations over a [`PhotoStore`].

use crate::error::{ServiceError, ServiceResult};
use crate::upload::PhotoUpload;
use photospot_core::config::QuerySettings;
use photospot_core::validation::FieldError;
use photospot_policy::{photo_visibility, PhotoListItem, PhotoView, ProfileView, Requester, Visibility};
use photospot_query::{CountMode, Paginated, PaginationMeta, PhotoFilterSet, RawPhotoQuery};
use photospot_store::PhotoStore;
use photospot_telemetry::Timer;
use rand::Rng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Listing, detail, profile and upload handling.
///
/// Validation, visibility and redaction happen here; the store only
/// persists and filters.
pub struct PhotoService<S> {
    store: S,
    query: QuerySettings,
}

impl<S: PhotoStore> PhotoService<S> {
    /// Service over `store` with the given listing settings.
    pub fn new(store: S, query: QuerySettings) -> Self {
        Self { store, query }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `GET /photos`
    ///
    /// `meta.total` is exact on the first page; later pages may carry an
    /// estimate unless the count policy is `always`.
    #[instrument(skip(self, raw))]
    pub async fn list_photos(&self, raw: &RawPhotoQuery) -> ServiceResult<Paginated<PhotoListItem>> {
        let filters = PhotoFilterSet::parse(raw)?;
        let count = CountMode::for_offset(filters.offset(), self.query.count_policy);

        let timer = Timer::start("list_photos");
        let page = self
            .store
            .list_photos(&filters, count)
            .await
            .map_err(|e| ServiceError::internal("list_photos", e))?;
        timer.stop();

        let meta = PaginationMeta::reconcile(page.total, filters.limit(), filters.offset(), page.items.len());
        metrics::counter!("photospot_photos_listed_total").increment(page.items.len() as u64);
        debug!(
            returned = page.items.len(),
            total = meta.total,
            count = ?count,
            has_more = meta.has_more,
            "Listed photos"
        );

        Ok(Paginated::new(page.items, meta))
    }

    /// `GET /photos/{id}`
    ///
    /// A photo the caller may not see is reported exactly like a missing one.
    #[instrument(skip(self, requester), fields(requester = ?requester.map(|r| r.id)))]
    pub async fn get_photo(&self, id: &str, requester: Option<&Requester>) -> ServiceResult<PhotoView> {
        let id = parse_id(id)?;

        let timer = Timer::start("get_photo");
        let record = self
            .store
            .get_photo(id)
            .await
            .map_err(|e| ServiceError::internal("get_photo", e))?;
        timer.stop();

        let Some(record) = record else {
            return Err(ServiceError::not_found("photo"));
        };

        match photo_visibility(&record, requester) {
            Visibility::Visible(view) => Ok(*view),
            Visibility::Hidden => {
                metrics::counter!("photospot_hidden_photo_lookups_total").increment(1);
                debug!(photo_id = %id, status = %record.status, "Photo hidden from requester");
                Err(ServiceError::not_found("photo"))
            }
        }
    }

    /// `GET /profiles/{id}`
    #[instrument(skip(self, viewer), fields(viewer = ?viewer.map(|v| v.id)))]
    pub async fn get_profile(&self, id: &str, viewer: Option<&Requester>) -> ServiceResult<ProfileView> {
        let id = parse_id(id)?;

        let profile = self
            .store
            .get_profile(id)
            .await
            .map_err(|e| ServiceError::internal("get_profile", e))?
            .ok_or_else(|| ServiceError::not_found("profile"))?;

        Ok(ProfileView::for_viewer(&profile, viewer))
    }

    /// `POST /photos`
    ///
    /// The public point is drawn here, once; the stored photo starts pending
    /// and is returned in the owner's view.
    #[instrument(skip(self, owner, upload, rng), fields(owner = %owner.id))]
    pub async fn create_photo<R: Rng + ?Sized>(
        &self,
        owner: &Requester,
        upload: PhotoUpload,
        rng: &mut R,
    ) -> ServiceResult<PhotoView> {
        let photo = upload.prepare(owner, rng)?;
        let blurred = photo.blur.is_enabled();

        let record = self
            .store
            .insert_photo(photo)
            .await
            .map_err(|e| ServiceError::internal("insert_photo", e))?;

        metrics::counter!("photospot_photos_created_total").increment(1);
        info!(photo_id = %record.id, blurred, "Photo created");

        Ok(PhotoView::from_record(&record, true))
    }
}

fn parse_id(id: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| {
        ServiceError::invalid(
            FieldError::new("id", "INVALID_FORMAT", "must be a UUID")
                .expected("UUID")
                .actual(id),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use photospot_core::config::CountPolicy;
    use photospot_geo::{BlurSettings, GeoPoint, PhotoLocationPair};
    use photospot_policy::{ModerationStatus, PhotoRecord, ProfileRecord, UserRole};
    use photospot_query::{BlurRequest, Category};
    use photospot_store::{ListingPage, MemoryStore, NewPhoto, StoreError, StoreResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn record(owner_id: Uuid, status: ModerationStatus, minutes: i64) -> PhotoRecord {
        PhotoRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: "Dunes".into(),
            description: None,
            image_url: "https://cdn.example.com/d.jpg".into(),
            thumbnail_url: None,
            category: Category::Landscape,
            season: None,
            time_of_day: None,
            location: PhotoLocationPair::from_stored(GeoPoint::new(-116.8, 36.6), GeoPoint::new(-116.801, 36.601)),
            blur: BlurSettings::default_enabled(),
            exif: Some(json!({"f": 8})),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes),
        }
    }

    fn service(store: MemoryStore) -> PhotoService<MemoryStore> {
        PhotoService::new(store, QuerySettings::default())
    }

    fn as_object(view: &impl serde::Serialize) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(view).unwrap() {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl PhotoStore for BrokenStore {
        async fn list_photos(&self, _: &PhotoFilterSet, _: CountMode) -> StoreResult<ListingPage> {
            Err(StoreError::response(503, "upstream timeout"))
        }
        async fn get_photo(&self, _: Uuid) -> StoreResult<Option<PhotoRecord>> {
            Err(StoreError::decode("bad row"))
        }
        async fn insert_photo(&self, _: NewPhoto) -> StoreResult<PhotoRecord> {
            Err(StoreError::response(500, "insert failed"))
        }
        async fn get_profile(&self, _: Uuid) -> StoreResult<Option<ProfileRecord>> {
            Ok(None)
        }
    }

    /// Reports a fixed estimate, or none, and records which count mode was asked for.
    struct EstimatingStore {
        inner: MemoryStore,
        estimate: Option<u64>,
        modes: tokio::sync::Mutex<Vec<CountMode>>,
    }

    #[async_trait]
    impl PhotoStore for EstimatingStore {
        async fn list_photos(&self, filters: &PhotoFilterSet, count: CountMode) -> StoreResult<ListingPage> {
            self.modes.lock().await.push(count);
            let mut page = self.inner.list_photos(filters, count).await?;
            if count == CountMode::Estimated {
                page.total = self.estimate;
            }
            Ok(page)
        }
        async fn get_photo(&self, id: Uuid) -> StoreResult<Option<PhotoRecord>> {
            self.inner.get_photo(id).await
        }
        async fn insert_photo(&self, photo: NewPhoto) -> StoreResult<PhotoRecord> {
            self.inner.insert_photo(photo).await
        }
        async fn get_profile(&self, id: Uuid) -> StoreResult<Option<ProfileRecord>> {
            self.inner.get_profile(id).await
        }
    }

    #[tokio::test]
    async fn test_list_defaults_and_meta() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for minute in 0..3 {
            store.put_photo(record(owner, ModerationStatus::Approved, minute)).await;
        }
        store.put_photo(record(owner, ModerationStatus::Pending, 9)).await;

        let page = service(store).list_photos(&RawPhotoQuery::default()).await.unwrap();
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.limit, 200);
        assert_eq!(page.meta.offset, 0);
        assert!(!page.meta.has_more);
    }

    #[tokio::test]
    async fn test_list_has_more() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for minute in 0..5 {
            store.put_photo(record(owner, ModerationStatus::Approved, minute)).await;
        }

        let raw = RawPhotoQuery::from_pairs([("limit", "2"), ("offset", "2")]);
        let page = service(store).list_photos(&raw).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert!(page.meta.has_more);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_query() {
        let raw = RawPhotoQuery::from_pairs([("limit", "201"), ("bbox", "1,2,3")]);
        let err = service(MemoryStore::new()).list_photos(&raw).await.unwrap_err();

        assert_eq!(err.status_code(), 400);
        match err {
            ServiceError::Validation(failure) => assert_eq!(failure.fields(), vec!["bbox", "limit"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_counts_exactly_on_first_page_only() {
        let inner = MemoryStore::new();
        let owner = Uuid::new_v4();
        for minute in 0..4 {
            inner.put_photo(record(owner, ModerationStatus::Approved, minute)).await;
        }
        let store = EstimatingStore {
            inner,
            estimate: Some(1000),
            modes: tokio::sync::Mutex::new(Vec::new()),
        };
        let service = PhotoService::new(store, QuerySettings::default());

        service.list_photos(&RawPhotoQuery::default()).await.unwrap();
        let page = service
            .list_photos(&RawPhotoQuery::from_pairs([("limit", "2"), ("offset", "2")]))
            .await
            .unwrap();

        assert_eq!(*service.store().modes.lock().await, vec![CountMode::Exact, CountMode::Estimated]);
        assert_eq!(page.meta.total, 1000);
        assert!(page.meta.has_more);
    }

    #[tokio::test]
    async fn test_list_without_total_keeps_paging_on_full_page() {
        let inner = MemoryStore::new();
        let owner = Uuid::new_v4();
        for minute in 0..5 {
            inner.put_photo(record(owner, ModerationStatus::Approved, minute)).await;
        }
        let store = EstimatingStore {
            inner,
            estimate: None,
            modes: tokio::sync::Mutex::new(Vec::new()),
        };
        let service = PhotoService::new(store, QuerySettings::default());

        let page = service
            .list_photos(&RawPhotoQuery::from_pairs([("limit", "2"), ("offset", "2")]))
            .await
            .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total, 4);
        assert!(page.meta.has_more);

        let last = service
            .list_photos(&RawPhotoQuery::from_pairs([("limit", "2"), ("offset", "4")]))
            .await
            .unwrap();
        assert_eq!(last.data.len(), 1);
        assert!(!last.meta.has_more);
    }

    #[tokio::test]
    async fn test_always_policy_counts_every_page() {
        let store = EstimatingStore {
            inner: MemoryStore::new(),
            estimate: Some(1000),
            modes: tokio::sync::Mutex::new(Vec::new()),
        };
        let service = PhotoService::new(
            store,
            QuerySettings {
                count_policy: CountPolicy::Always,
            },
        );

        service
            .list_photos(&RawPhotoQuery::from_pairs([("offset", "400")]))
            .await
            .unwrap();
        assert_eq!(*service.store().modes.lock().await, vec![CountMode::Exact]);
    }

    #[tokio::test]
    async fn test_owner_sees_pending_photo_with_restricted_fields() {
        let store = MemoryStore::new();
        let owner = Requester::new(Uuid::new_v4(), UserRole::Enthusiast);
        let photo = record(owner.id, ModerationStatus::Pending, 0);
        store.put_photo(photo.clone()).await;

        let view = service(store).get_photo(&photo.id.to_string(), Some(&owner)).await.unwrap();
        let map = as_object(&view);
        assert!(map.contains_key("exif"));
        assert!(map.contains_key("location_exact"));
        assert_eq!(map["status"], "pending");
    }

    #[tokio::test]
    async fn test_pending_photo_is_not_found_for_others() {
        let store = MemoryStore::new();
        let photo = record(Uuid::new_v4(), ModerationStatus::Pending, 0);
        store.put_photo(photo.clone()).await;
        let service = service(store);
        let stranger = Requester::new(Uuid::new_v4(), UserRole::Photographer);

        for requester in [Some(&stranger), None] {
            let err = service.get_photo(&photo.id.to_string(), requester).await.unwrap_err();
            assert_eq!(err.status_code(), 404);
        }

        let missing = service.get_photo(&Uuid::new_v4().to_string(), None).await.unwrap_err();
        assert_eq!(missing.body(), service.get_photo(&photo.id.to_string(), None).await.unwrap_err().body());
    }

    #[tokio::test]
    async fn test_approved_photo_redacted_for_others() {
        let store = MemoryStore::new();
        let photo = record(Uuid::new_v4(), ModerationStatus::Approved, 0);
        store.put_photo(photo.clone()).await;

        let view = service(store).get_photo(&photo.id.to_string(), None).await.unwrap();
        let map = as_object(&view);
        for key in ["exif", "location_exact", "status"] {
            assert!(!map.contains_key(key), "{key} leaked");
        }
        assert_eq!(view.location, photo.location.public());
    }

    #[tokio::test]
    async fn test_malformed_id_is_validation_error() {
        let err = service(MemoryStore::new()).get_photo("not-a-uuid", None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.body().fields.unwrap()[0].field, "id");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_with_trace_id() {
        let service = PhotoService::new(BrokenStore, QuerySettings::default());

        let err = service.list_photos(&RawPhotoQuery::default()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.body().trace_id.is_some());

        let err = service.get_photo(&Uuid::new_v4().to_string(), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_profile_redaction() {
        let store = MemoryStore::new();
        let profile = ProfileRecord {
            id: Uuid::new_v4(),
            username: "sam".into(),
            display_name: None,
            bio: None,
            avatar_url: None,
            role: UserRole::Enthusiast,
            company_name: Some("Side Gig".into()),
            website_url: None,
            social_links: None,
            created_at: Utc::now(),
        };
        store.put_profile(profile.clone()).await;
        let service = service(store);

        let view = service.get_profile(&profile.id.to_string(), None).await.unwrap();
        assert!(!as_object(&view).contains_key("company_name"));

        let owner = Requester::new(profile.id, UserRole::Enthusiast);
        let own = service.get_profile(&profile.id.to_string(), Some(&owner)).await.unwrap();
        assert_eq!(as_object(&own)["company_name"], "Side Gig");

        let missing = service.get_profile(&Uuid::new_v4().to_string(), None).await.unwrap_err();
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_create_photo_stores_pending_and_returns_owner_view() {
        let service = service(MemoryStore::new());
        let owner = Requester::new(Uuid::new_v4(), UserRole::Photographer);
        let upload = PhotoUpload {
            title: "Ridge".into(),
            image_url: "https://cdn.example.com/r.jpg".into(),
            category: "nature".into(),
            longitude: 7.65,
            latitude: 45.97,
            blur: BlurRequest::enabled(None),
            ..PhotoUpload::default()
        };
        let mut rng = StdRng::seed_from_u64(11);

        let view = service.create_photo(&owner, upload, &mut rng).await.unwrap();
        assert_eq!(view.status, Some(ModerationStatus::Pending));
        assert_eq!(view.location_exact, Some(GeoPoint::new(7.65, 45.97)));
        assert_ne!(Some(view.location), view.location_exact);
        assert!(view.location_blurred);

        // the stored public point is what later reads return
        let stored = service.store().get_photo(view.id).await.unwrap().unwrap();
        assert_eq!(stored.location.public(), view.location);

        // pending uploads are not listed
        let page = service.list_photos(&RawPhotoQuery::default()).await.unwrap();
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_create_photo_rejects_invalid_upload() {
        let service = service(MemoryStore::new());
        let owner = Requester::new(Uuid::new_v4(), UserRole::Photographer);
        let mut rng = StdRng::seed_from_u64(11);

        let err = service
            .create_photo(&owner, PhotoUpload::default(), &mut rng)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(service.store().photo_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_photo_store_failure() {
        let service = PhotoService::new(BrokenStore, QuerySettings::default());
        let owner = Requester::new(Uuid::new_v4(), UserRole::Photographer);
        let upload = PhotoUpload {
            title: "Ridge".into(),
            image_url: "https://cdn.example.com/r.jpg".into(),
            category: "nature".into(),
            ..PhotoUpload::default()
        };
        let mut rng = StdRng::seed_from_u64(11);

        let err = service.create_photo(&owner, upload, &mut rng).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
