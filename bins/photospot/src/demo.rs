//! Seeded in-memory data for `--memory` runs.

use chrono::{Duration, TimeZone, Utc};
use photospot_geo::{BlurSettings, GeoPoint, PhotoLocationPair};
use photospot_policy::{ModerationStatus, PhotoRecord, ProfileRecord, SocialLinks, UserRole};
use photospot_query::{Category, Season, TimeOfDay};
use photospot_store::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

/// Professional photographer with business details
pub const PHOTOGRAPHER_ID: Uuid = Uuid::from_u128(0x5d1c_6a0e_2f4b_4c8e_9a11_0000_0000_0001);
/// Hobbyist account
pub const ENTHUSIAST_ID: Uuid = Uuid::from_u128(0x5d1c_6a0e_2f4b_4c8e_9a11_0000_0000_0002);

struct Spot {
    title: &'static str,
    lon: f64,
    lat: f64,
    category: Category,
    season: Option<Season>,
    time_of_day: Option<TimeOfDay>,
    blur: Option<u32>,
    status: ModerationStatus,
}

const SPOTS: [Spot; 6] = [
    Spot {
        title: "Golden Gate from Battery Spencer",
        lon: -122.4833,
        lat: 37.8324,
        category: Category::Architecture,
        season: Some(Season::Winter),
        time_of_day: Some(TimeOfDay::BlueHour),
        blur: None,
        status: ModerationStatus::Approved,
    },
    Spot {
        title: "Fog over Twin Peaks",
        lon: -122.4477,
        lat: 37.7544,
        category: Category::Landscape,
        season: Some(Season::Summer),
        time_of_day: Some(TimeOfDay::GoldenHourMorning),
        blur: Some(300),
        status: ModerationStatus::Approved,
    },
    Spot {
        title: "Chinatown lanterns",
        lon: -122.4058,
        lat: 37.7941,
        category: Category::Street,
        season: None,
        time_of_day: Some(TimeOfDay::Night),
        blur: Some(150),
        status: ModerationStatus::Approved,
    },
    Spot {
        title: "Milky Way at Point Reyes",
        lon: -123.0219,
        lat: 38.0404,
        category: Category::Astrophotography,
        season: Some(Season::Summer),
        time_of_day: Some(TimeOfDay::Night),
        blur: Some(500),
        status: ModerationStatus::Approved,
    },
    Spot {
        title: "Backyard hummingbird",
        lon: -122.2711,
        lat: 37.8044,
        category: Category::Wildlife,
        season: Some(Season::Spring),
        time_of_day: None,
        blur: Some(500),
        status: ModerationStatus::Pending,
    },
    Spot {
        title: "Lands End labyrinth",
        lon: -122.5052,
        lat: 37.7877,
        category: Category::Seascape,
        season: Some(Season::Autumn),
        time_of_day: Some(TimeOfDay::GoldenHourEvening),
        blur: None,
        status: ModerationStatus::Rejected,
    },
];

/// A store holding two profiles and a handful of Bay Area photos.
///
/// Blurred points are drawn from a fixed seed, so every run lists the same
/// public locations.
pub async fn seeded_store() -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();
    let since = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap_or_else(Utc::now);
    let mut rng = StdRng::seed_from_u64(0x5eed);

    store
        .put_profile(ProfileRecord {
            id: PHOTOGRAPHER_ID,
            username: "harbor_light".into(),
            display_name: Some("Harbor Light Studio".into()),
            bio: Some("Architecture and cityscapes around the Bay.".into()),
            avatar_url: None,
            role: UserRole::Photographer,
            company_name: Some("Harbor Light LLC".into()),
            website_url: Some("https://harborlight.example.com".into()),
            social_links: Some(SocialLinks::from([(
                "instagram".to_string(),
                "https://instagram.com/harbor_light".to_string(),
            )])),
            created_at: since,
        })
        .await;
    store
        .put_profile(ProfileRecord {
            id: ENTHUSIAST_ID,
            username: "weekend_walker".into(),
            display_name: None,
            bio: None,
            avatar_url: None,
            role: UserRole::Enthusiast,
            company_name: Some("Day job Inc.".into()),
            website_url: None,
            social_links: None,
            created_at: since,
        })
        .await;

    for (index, spot) in SPOTS.iter().enumerate() {
        let blur = match spot.blur {
            Some(radius) => BlurSettings::with_radius(radius)?,
            None => BlurSettings::disabled(),
        };
        let owner_id = if index % 2 == 0 { PHOTOGRAPHER_ID } else { ENTHUSIAST_ID };
        let location = PhotoLocationPair::create(GeoPoint::try_new(spot.lon, spot.lat)?, &blur, &mut rng)?;
        let ordinal = u128::try_from(index)? + 1;

        store
            .put_photo(PhotoRecord {
                id: Uuid::from_u128(0x0f0f_0000_0000_4000_8000_0000_0000_0000 + ordinal),
                owner_id,
                title: spot.title.to_string(),
                description: None,
                image_url: format!("https://cdn.photospot.example/photos/{ordinal}.jpg"),
                thumbnail_url: Some(format!("https://cdn.photospot.example/thumbs/{ordinal}.jpg")),
                category: spot.category,
                season: spot.season,
                time_of_day: spot.time_of_day,
                location,
                blur,
                exif: Some(serde_json::json!({ "camera": "X100V", "iso": 400 })),
                status: spot.status,
                created_at: since + Duration::hours(i64::try_from(index)?),
            })
            .await;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photospot_core::config::QuerySettings;
    use photospot_query::RawPhotoQuery;
    use photospot_service::PhotoService;
    use photospot_store::PhotoStore;

    #[tokio::test]
    async fn test_seeded_store_lists_approved_only() {
        let service = PhotoService::new(seeded_store().await.unwrap(), QuerySettings::default());
        let page = service.list_photos(&RawPhotoQuery::default()).await.unwrap();

        assert_eq!(page.data.len(), 4);
        assert_eq!(page.meta.total, 4);
        assert_eq!(page.data[0].title, "Milky Way at Point Reyes");
    }

    #[tokio::test]
    async fn test_seeded_draws_are_stable() {
        let first = seeded_store().await.unwrap();
        let second = seeded_store().await.unwrap();
        let id = Uuid::from_u128(0x0f0f_0000_0000_4000_8000_0000_0000_0002);

        let a = first.get_photo(id).await.unwrap().unwrap();
        let b = second.get_photo(id).await.unwrap().unwrap();
        assert_eq!(a.location.public(), b.location.public());
        assert_ne!(a.location.public(), a.location.exact());
    }
}
