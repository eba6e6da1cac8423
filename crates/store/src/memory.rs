//! In-process store for tests, demos and local runs without Supabase.

use crate::error::StoreResult;
use crate::repository::{ListingPage, PhotoStore};
use crate::rows::NewPhoto;
use async_trait::async_trait;
use chrono::Utc;
use photospot_geo::GeoPoint;
use photospot_policy::{ModerationStatus, PhotoListItem, PhotoRecord, ProfileRecord, UserRole};
use photospot_query::{Category, CountMode, ListingCandidate, PhotoFilterSet, Season, TimeOfDay};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Rows held in memory behind a lock.
///
/// Listing applies the same semantics as the PostgREST adapter: approved
/// only, filters on the public point, newest first, exact counts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    photos: RwLock<Vec<PhotoRecord>>,
    profiles: RwLock<HashMap<Uuid, ProfileRecord>>,
}

struct Candidate<'a> {
    photo: &'a PhotoRecord,
    by_photographer: bool,
}

impl ListingCandidate for Candidate<'_> {
    fn public_location(&self) -> GeoPoint {
        self.photo.location.public()
    }

    fn category(&self) -> Option<Category> {
        Some(self.photo.category)
    }

    fn season(&self) -> Option<Season> {
        self.photo.season
    }

    fn time_of_day(&self) -> Option<TimeOfDay> {
        self.photo.time_of_day
    }

    fn by_photographer(&self) -> bool {
        self.by_photographer
    }
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a photo row as-is.
    pub async fn put_photo(&self, photo: PhotoRecord) {
        let mut photos = self.photos.write().await;
        photos.retain(|p| p.id != photo.id);
        photos.push(photo);
    }

    /// Seed a profile row.
    pub async fn put_profile(&self, profile: ProfileRecord) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    /// Change a photo's review state; returns whether the photo exists.
    pub async fn set_status(&self, id: Uuid, status: ModerationStatus) -> bool {
        let mut photos = self.photos.write().await;
        match photos.iter_mut().find(|p| p.id == id) {
            Some(photo) => {
                photo.status = status;
                true
            }
            None => false,
        }
    }

    /// Number of stored photos, any status.
    pub async fn photo_count(&self) -> usize {
        self.photos.read().await.len()
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn list_photos(&self, filters: &PhotoFilterSet, _count: CountMode) -> StoreResult<ListingPage> {
        let photos = self.photos.read().await;
        let profiles = self.profiles.read().await;

        let mut matching: Vec<&PhotoRecord> = photos
            .iter()
            .filter(|photo| photo.status == ModerationStatus::Approved)
            .filter(|photo| {
                let by_photographer = profiles
                    .get(&photo.owner_id)
                    .is_some_and(|owner| owner.role == UserRole::Photographer);
                filters.matches(&Candidate { photo, by_photographer })
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let skip = usize::try_from(filters.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(filters.limit() as usize)
            .map(PhotoListItem::from)
            .collect();

        Ok(ListingPage {
            items,
            total: Some(total),
        })
    }

    async fn get_photo(&self, id: Uuid) -> StoreResult<Option<PhotoRecord>> {
        Ok(self.photos.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_photo(&self, photo: NewPhoto) -> StoreResult<PhotoRecord> {
        let record = photo.into_record(Uuid::new_v4(), Utc::now());
        self.photos.write().await.push(record.clone());
        Ok(record)
    }

    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<ProfileRecord>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use photospot_geo::{BlurSettings, PhotoLocationPair};
    use photospot_query::RawPhotoQuery;

    fn photo(owner_id: Uuid, at: GeoPoint, status: ModerationStatus, minutes: i64) -> PhotoRecord {
        PhotoRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: format!("photo at {at}"),
            description: None,
            image_url: "https://cdn.example.com/p.jpg".into(),
            thumbnail_url: None,
            category: Category::Street,
            season: None,
            time_of_day: None,
            location: PhotoLocationPair::from_stored(GeoPoint::new(at.lon + 0.5, at.lat), at),
            blur: BlurSettings::default_enabled(),
            exif: None,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes),
        }
    }

    fn profile(id: Uuid, role: UserRole) -> ProfileRecord {
        ProfileRecord {
            id,
            username: format!("user-{id}"),
            display_name: None,
            bio: None,
            avatar_url: None,
            role,
            company_name: None,
            website_url: None,
            social_links: None,
            created_at: Utc::now(),
        }
    }

    fn filters(pairs: &[(&str, &str)]) -> PhotoFilterSet {
        PhotoFilterSet::parse(&RawPhotoQuery::from_pairs(pairs.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_listing_returns_approved_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let older = photo(owner, GeoPoint::new(1.0, 1.0), ModerationStatus::Approved, 0);
        let newer = photo(owner, GeoPoint::new(2.0, 2.0), ModerationStatus::Approved, 10);
        let pending = photo(owner, GeoPoint::new(3.0, 3.0), ModerationStatus::Pending, 20);
        store.put_photo(older.clone()).await;
        store.put_photo(newer.clone()).await;
        store.put_photo(pending).await;

        let page = store.list_photos(&filters(&[]), CountMode::Exact).await.unwrap();
        let ids: Vec<Uuid> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(page.total, Some(2));
    }

    #[tokio::test]
    async fn test_bbox_matches_public_point_not_exact() {
        let store = MemoryStore::new();
        // public point inside the box, exact point 0.5 degrees east of it
        let record = photo(Uuid::new_v4(), GeoPoint::new(9.9, 5.0), ModerationStatus::Approved, 0);
        store.put_photo(record.clone()).await;

        let inside = store
            .list_photos(&filters(&[("bbox", "9,4,10,6")]), CountMode::Exact)
            .await
            .unwrap();
        assert_eq!(inside.items.len(), 1);
        assert_eq!(inside.items[0].location, record.location.public());

        let around_exact = store
            .list_photos(&filters(&[("bbox", "10.2,4,10.6,6")]), CountMode::Exact)
            .await
            .unwrap();
        assert!(around_exact.items.is_empty());
    }

    #[tokio::test]
    async fn test_photographer_only_uses_owner_role() {
        let store = MemoryStore::new();
        let pro = Uuid::new_v4();
        let amateur = Uuid::new_v4();
        store.put_profile(profile(pro, UserRole::Photographer)).await;
        store.put_profile(profile(amateur, UserRole::Enthusiast)).await;
        store.put_photo(photo(pro, GeoPoint::new(0.0, 0.0), ModerationStatus::Approved, 0)).await;
        store.put_photo(photo(amateur, GeoPoint::new(0.0, 0.0), ModerationStatus::Approved, 1)).await;

        let page = store
            .list_photos(&filters(&[("photographer_only", "true")]), CountMode::Exact)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].owner_id, pro);
    }

    #[tokio::test]
    async fn test_limit_and_offset() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for minute in 0..7 {
            store
                .put_photo(photo(owner, GeoPoint::new(0.0, 0.0), ModerationStatus::Approved, minute))
                .await;
        }

        let page = store
            .list_photos(&filters(&[("limit", "3"), ("offset", "5")]), CountMode::Exact)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(7));
    }

    #[tokio::test]
    async fn test_insert_is_pending() {
        let store = MemoryStore::new();
        let point = GeoPoint::new(4.0, 50.0);
        let new = NewPhoto {
            owner_id: Uuid::new_v4(),
            title: "Canal".into(),
            description: None,
            image_url: "https://cdn.example.com/c.jpg".into(),
            thumbnail_url: None,
            category: Category::Urban,
            season: None,
            time_of_day: None,
            location: PhotoLocationPair::from_stored(point, point),
            blur: BlurSettings::disabled(),
            exif: None,
        };

        let record = store.insert_photo(new).await.unwrap();
        assert_eq!(record.status, ModerationStatus::Pending);
        assert_eq!(store.get_photo(record.id).await.unwrap(), Some(record.clone()));
        assert!(store.set_status(record.id, ModerationStatus::Approved).await);
        assert_eq!(store.photo_count().await, 1);
    }
}
