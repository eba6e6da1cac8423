//! Row shapes exchanged with PostgREST.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use photospot_geo::{parse_postgis_point, to_ewkt, BlurSettings, GeoPoint, PhotoLocationPair};
use photospot_policy::{ModerationStatus, PhotoListItem, PhotoRecord};
use photospot_query::{Category, Season, TimeOfDay};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the listing view.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Category,
    pub season: Option<Season>,
    pub time_of_day: Option<TimeOfDay>,
    pub public_lon: f64,
    pub public_lat: f64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for PhotoListItem {
    type Error = StoreError;

    fn try_from(row: ListingRow) -> StoreResult<Self> {
        let location = GeoPoint::try_new(row.public_lon, row.public_lat)
            .map_err(|e| StoreError::decode(format!("photo {}: {e}", row.id)))?;
        Ok(PhotoListItem {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            image_url: row.image_url,
            thumbnail_url: row.thumbnail_url,
            category: row.category,
            season: row.season,
            time_of_day: row.time_of_day,
            location,
            created_at: row.created_at,
        })
    }
}

/// A full row of the photos table. Geography columns arrive as GeoJSON.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Category,
    pub season: Option<Season>,
    pub time_of_day: Option<TimeOfDay>,
    pub location_exact: serde_json::Value,
    pub location_public: serde_json::Value,
    #[serde(default)]
    pub blur_location: bool,
    pub blur_radius: Option<u32>,
    pub exif: Option<serde_json::Value>,
    pub status: ModerationStatus,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PhotoRow> for PhotoRecord {
    type Error = StoreError;

    fn try_from(row: PhotoRow) -> StoreResult<Self> {
        let point = |value: &serde_json::Value, column: &str| {
            parse_postgis_point(value)
                .ok_or_else(|| StoreError::decode(format!("photo {}: unreadable {column}", row.id)))
        };
        let exact = point(&row.location_exact, "location_exact")?;
        let public = point(&row.location_public, "location_public")?;

        let blur = match (row.blur_location, row.blur_radius) {
            (false, _) => BlurSettings::disabled(),
            (true, None) => BlurSettings::default_enabled(),
            (true, Some(radius)) => BlurSettings::with_radius(radius)
                .map_err(|e| StoreError::decode(format!("photo {}: {e}", row.id)))?,
        };

        Ok(PhotoRecord {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            thumbnail_url: row.thumbnail_url,
            category: row.category,
            season: row.season,
            time_of_day: row.time_of_day,
            location: PhotoLocationPair::from_stored(exact, public),
            blur,
            exif: row.exif,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// A new photo, before the store assigns id, status and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Category,
    pub season: Option<Season>,
    pub time_of_day: Option<TimeOfDay>,
    /// Computed once at upload; never redrawn
    pub location: PhotoLocationPair,
    pub blur: BlurSettings,
    pub exif: Option<serde_json::Value>,
}

impl NewPhoto {
    /// The stored record for this upload.
    #[must_use]
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> PhotoRecord {
        PhotoRecord {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            thumbnail_url: self.thumbnail_url,
            category: self.category,
            season: self.season,
            time_of_day: self.time_of_day,
            location: self.location,
            blur: self.blur,
            exif: self.exif,
            status: ModerationStatus::Pending,
            created_at,
        }
    }
}

/// Insert body for the photos table.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoInsertRow<'a> {
    owner_id: Uuid,
    title: &'a str,
    description: Option<&'a str>,
    image_url: &'a str,
    thumbnail_url: Option<&'a str>,
    category: Category,
    season: Option<Season>,
    time_of_day: Option<TimeOfDay>,
    location_exact: String,
    location_public: String,
    blur_location: bool,
    blur_radius: Option<u32>,
    exif: Option<&'a serde_json::Value>,
    status: ModerationStatus,
}

impl<'a> From<&'a NewPhoto> for PhotoInsertRow<'a> {
    fn from(photo: &'a NewPhoto) -> Self {
        Self {
            owner_id: photo.owner_id,
            title: &photo.title,
            description: photo.description.as_deref(),
            image_url: &photo.image_url,
            thumbnail_url: photo.thumbnail_url.as_deref(),
            category: photo.category,
            season: photo.season,
            time_of_day: photo.time_of_day,
            location_exact: to_ewkt(&photo.location.exact()),
            location_public: to_ewkt(&photo.location.public()),
            blur_location: photo.blur.is_enabled(),
            blur_radius: photo.blur.radius_meters(),
            exif: photo.exif.as_ref(),
            status: ModerationStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn photo_row_json() -> serde_json::Value {
        json!({
            "id": "7d7f8c36-4d5a-4a57-9a3e-1f0c1f9d2b11",
            "owner_id": "0b6c7a62-96a4-4b8f-bf4b-c8d6f3c1a2e0",
            "title": "Milky Way over Bodie",
            "description": null,
            "image_url": "https://cdn.example.com/p/2.jpg",
            "thumbnail_url": null,
            "category": "astrophotography",
            "season": "summer",
            "time_of_day": "night",
            "location_exact": {"type": "Point", "coordinates": [-119.0149, 38.2124]},
            "location_public": {"type": "Point", "coordinates": [-119.0131, 38.2139]},
            "blur_location": true,
            "blur_radius": 250,
            "exif": {"iso": 6400},
            "status": "approved",
            "created_at": "2024-06-01T04:12:00Z"
        })
    }

    #[test]
    fn test_decode_photo_row() {
        let row: PhotoRow = serde_json::from_value(photo_row_json()).unwrap();
        let record = PhotoRecord::try_from(row).unwrap();

        assert_eq!(record.category, Category::Astrophotography);
        assert_eq!(record.location.exact(), GeoPoint::new(-119.0149, 38.2124));
        assert_eq!(record.location.public(), GeoPoint::new(-119.0131, 38.2139));
        assert_eq!(record.blur.radius_meters(), Some(250));
        assert_eq!(record.status, ModerationStatus::Approved);
    }

    #[test]
    fn test_decode_rejects_unreadable_point() {
        let mut value = photo_row_json();
        value["location_public"] = json!("POINT(500 0)");
        let row: PhotoRow = serde_json::from_value(value).unwrap();

        let err = PhotoRecord::try_from(row).unwrap_err();
        assert!(err.to_string().contains("location_public"));
    }

    #[test]
    fn test_decode_error_omits_coordinates() {
        let mut value = photo_row_json();
        value["location_exact"] = json!("SRID=4269;POINT(-119.014912 38.212401)");
        let row: PhotoRow = serde_json::from_value(value).unwrap();

        let message = PhotoRecord::try_from(row).unwrap_err().to_string();
        assert!(message.contains("location_exact"));
        assert!(!message.contains("119.01"));
        assert!(!message.contains("38.21"));
    }

    #[test]
    fn test_decode_rejects_bad_radius() {
        let mut value = photo_row_json();
        value["blur_radius"] = json!(50);
        let row: PhotoRow = serde_json::from_value(value).unwrap();
        assert!(matches!(PhotoRecord::try_from(row), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_blur_off_ignores_radius() {
        let mut value = photo_row_json();
        value["blur_location"] = json!(false);
        let row: PhotoRow = serde_json::from_value(value).unwrap();
        assert!(!PhotoRecord::try_from(row).unwrap().blur.is_enabled());
    }

    #[test]
    fn test_decode_listing_row() {
        let row: ListingRow = serde_json::from_value(json!({
            "id": "7d7f8c36-4d5a-4a57-9a3e-1f0c1f9d2b11",
            "owner_id": "0b6c7a62-96a4-4b8f-bf4b-c8d6f3c1a2e0",
            "title": "Bodie",
            "image_url": "https://cdn.example.com/p/2.jpg",
            "thumbnail_url": null,
            "category": "urban",
            "season": null,
            "time_of_day": null,
            "public_lon": -119.0131,
            "public_lat": 38.2139,
            "created_at": "2024-06-01T04:12:00Z"
        }))
        .unwrap();

        let item = PhotoListItem::try_from(row).unwrap();
        assert_eq!(item.location, GeoPoint::new(-119.0131, 38.2139));
    }

    #[test]
    fn test_insert_row_writes_ewkt() {
        let photo = NewPhoto {
            owner_id: Uuid::new_v4(),
            title: "Pier".into(),
            description: None,
            image_url: "https://cdn.example.com/p/3.jpg".into(),
            thumbnail_url: None,
            category: Category::Seascape,
            season: None,
            time_of_day: Some(TimeOfDay::BlueHour),
            location: PhotoLocationPair::from_stored(GeoPoint::new(2.5, 41.25), GeoPoint::new(2.5, 41.25)),
            blur: BlurSettings::disabled(),
            exif: None,
        };

        let body = serde_json::to_value(PhotoInsertRow::from(&photo)).unwrap();
        assert_eq!(body["location_exact"], "SRID=4326;POINT(2.5 41.25)");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["blur_location"], false);
        assert!(body["blur_radius"].is_null());
    }
}
