//! Photo visibility and redaction.
//!
//! A photo is visible when it is approved, or the caller owns it, or the
//! caller moderates. Visible photos expose `exif`, `location_exact` and
//! `status` only to the owner and moderators; for everyone else those keys
//! are absent from the serialized object, never `null`.

use crate::requester::Requester;
use chrono::{DateTime, Utc};
use photospot_geo::{BlurSettings, GeoPoint, PhotoLocationPair};
use photospot_query::{Category, Season, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Review state of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting review
    #[default]
    Pending,
    /// Publicly listed
    Approved,
    /// Hidden from everyone but owner and moderators
    Rejected,
}

/// A status string that names no known state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown moderation status '{0}'")]
pub struct UnknownStatus(pub String);

impl ModerationStatus {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A photo as held by the store, with nothing redacted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Row id
    pub id: Uuid,
    /// Uploading user
    pub owner_id: Uuid,
    /// Display title
    pub title: String,
    /// Free-text caption
    pub description: Option<String>,
    /// Full-size image
    pub image_url: String,
    /// Listing-size image, if generated
    pub thumbnail_url: Option<String>,
    /// Subject category
    pub category: Category,
    /// Best season to shoot
    pub season: Option<Season>,
    /// Best light
    pub time_of_day: Option<TimeOfDay>,
    /// Exact and public points
    pub location: PhotoLocationPair,
    /// Blur applied when the public point was drawn
    pub blur: BlurSettings,
    /// Camera metadata as uploaded
    pub exif: Option<serde_json::Value>,
    /// Moderation state
    pub status: ModerationStatus,
    /// Upload time
    pub created_at: DateTime<Utc>,
}

/// Outcome of a detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Visibility {
    /// The caller may see the photo, in this shape
    Visible(Box<PhotoView>),
    /// The caller must be told the photo does not exist
    Hidden,
}

/// Owner or moderator of this photo.
#[must_use]
pub fn is_privileged(photo: &PhotoRecord, requester: Option<&Requester>) -> bool {
    requester.is_some_and(|r| r.owns(photo.owner_id) || r.is_moderator())
}

/// Whether the photo may be shown to `requester` at all.
#[must_use]
pub fn can_view(photo: &PhotoRecord, requester: Option<&Requester>) -> bool {
    photo.status == ModerationStatus::Approved || is_privileged(photo, requester)
}

/// Decide visibility and redact in one step.
#[must_use]
pub fn photo_visibility(photo: &PhotoRecord, requester: Option<&Requester>) -> Visibility {
    if !can_view(photo, requester) {
        return Visibility::Hidden;
    }
    let view = PhotoView::from_record(photo, is_privileged(photo, requester));
    Visibility::Visible(Box::new(view))
}

/// Detail representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoView {
    /// Row id
    pub id: Uuid,
    /// Uploading user
    pub owner_id: Uuid,
    /// Display title
    pub title: String,
    /// Free-text caption
    pub description: Option<String>,
    /// Full-size image
    pub image_url: String,
    /// Listing-size image, if generated
    pub thumbnail_url: Option<String>,
    /// Subject category
    pub category: Category,
    /// Best season to shoot
    pub season: Option<Season>,
    /// Best light
    pub time_of_day: Option<TimeOfDay>,
    /// Public, possibly blurred, point
    pub location: GeoPoint,
    /// Whether `location` was blurred
    pub location_blurred: bool,
    /// Upload time
    pub created_at: DateTime<Utc>,
    /// Outer `None` omits the key; inner `None` serializes as `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<Option<serde_json::Value>>,
    /// Exact point, privileged callers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_exact: Option<GeoPoint>,
    /// Blur radius in meters, privileged callers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_radius: Option<Option<u32>>,
    /// Moderation state, privileged callers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ModerationStatus>,
}

impl PhotoView {
    /// Shape a record, including restricted fields only when `privileged`.
    #[must_use]
    pub fn from_record(photo: &PhotoRecord, privileged: bool) -> Self {
        Self {
            id: photo.id,
            owner_id: photo.owner_id,
            title: photo.title.clone(),
            description: photo.description.clone(),
            image_url: photo.image_url.clone(),
            thumbnail_url: photo.thumbnail_url.clone(),
            category: photo.category,
            season: photo.season,
            time_of_day: photo.time_of_day,
            location: photo.location.public(),
            location_blurred: photo.blur.is_enabled(),
            created_at: photo.created_at,
            exif: privileged.then(|| photo.exif.clone()),
            location_exact: privileged.then(|| photo.location.exact()),
            blur_radius: privileged.then(|| photo.blur.radius_meters()),
            status: privileged.then_some(photo.status),
        }
    }
}

/// Listing row. Carries the public point only, whoever is asking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoListItem {
    /// Row id
    pub id: Uuid,
    /// Uploading user
    pub owner_id: Uuid,
    /// Display title
    pub title: String,
    /// Full-size image
    pub image_url: String,
    /// Listing-size image, if generated
    pub thumbnail_url: Option<String>,
    /// Subject category
    pub category: Category,
    /// Best season to shoot
    pub season: Option<Season>,
    /// Best light
    pub time_of_day: Option<TimeOfDay>,
    /// Public, possibly blurred, point
    pub location: GeoPoint,
    /// Upload time
    pub created_at: DateTime<Utc>,
}

impl From<&PhotoRecord> for PhotoListItem {
    fn from(photo: &PhotoRecord) -> Self {
        Self {
            id: photo.id,
            owner_id: photo.owner_id,
            title: photo.title.clone(),
            image_url: photo.image_url.clone(),
            thumbnail_url: photo.thumbnail_url.clone(),
            category: photo.category,
            season: photo.season,
            time_of_day: photo.time_of_day,
            location: photo.location.public(),
            created_at: photo.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requester::UserRole;
    use serde_json::json;

    const RESTRICTED: [&str; 4] = ["exif", "location_exact", "blur_radius", "status"];

    fn photo(owner_id: Uuid, status: ModerationStatus) -> PhotoRecord {
        let exact = GeoPoint::new(-122.4194, 37.7749);
        PhotoRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: "Fog over the bay".into(),
            description: None,
            image_url: "https://cdn.example.com/p/1.jpg".into(),
            thumbnail_url: None,
            category: Category::Landscape,
            season: Some(Season::Summer),
            time_of_day: Some(TimeOfDay::GoldenHourMorning),
            location: PhotoLocationPair::from_stored(exact, GeoPoint::new(-122.4180, 37.7760)),
            blur: BlurSettings::with_radius(300).unwrap(),
            exif: Some(json!({"iso": 100})),
            status,
            created_at: Utc::now(),
        }
    }

    fn serialized(visibility: Visibility) -> serde_json::Map<String, serde_json::Value> {
        match visibility {
            Visibility::Visible(view) => match serde_json::to_value(&*view).unwrap() {
                serde_json::Value::Object(map) => map,
                other => panic!("expected object, got {other}"),
            },
            Visibility::Hidden => panic!("expected a visible photo"),
        }
    }

    #[test]
    fn test_owner_sees_pending_photo_with_restricted_fields() {
        let owner = Requester::new(Uuid::new_v4(), UserRole::Enthusiast);
        let record = photo(owner.id, ModerationStatus::Pending);

        let map = serialized(photo_visibility(&record, Some(&owner)));
        for key in RESTRICTED {
            assert!(map.contains_key(key), "owner should see {key}");
        }
        assert_eq!(map["status"], json!("pending"));
        assert_eq!(map["location_exact"], json!([-122.4194, 37.7749]));
    }

    #[test]
    fn test_pending_photo_hidden_from_others() {
        let record = photo(Uuid::new_v4(), ModerationStatus::Pending);
        let stranger = Requester::new(Uuid::new_v4(), UserRole::Photographer);

        assert_eq!(photo_visibility(&record, Some(&stranger)), Visibility::Hidden);
        assert_eq!(photo_visibility(&record, None), Visibility::Hidden);
    }

    #[test]
    fn test_rejected_photo_visible_to_moderator() {
        let record = photo(Uuid::new_v4(), ModerationStatus::Rejected);
        let moderator = Requester::new(Uuid::new_v4(), UserRole::Moderator);

        let map = serialized(photo_visibility(&record, Some(&moderator)));
        assert_eq!(map["status"], json!("rejected"));
        assert!(map.contains_key("exif"));
    }

    #[test]
    fn test_approved_photo_omits_restricted_keys_for_others() {
        let record = photo(Uuid::new_v4(), ModerationStatus::Approved);
        let stranger = Requester::new(Uuid::new_v4(), UserRole::Enthusiast);

        for requester in [Some(&stranger), None] {
            let map = serialized(photo_visibility(&record, requester));
            for key in RESTRICTED {
                assert!(!map.contains_key(key), "{key} leaked");
            }
            assert_eq!(map["location"], json!([-122.4180, 37.7760]));
            assert_eq!(map["location_blurred"], json!(true));
        }
    }

    #[test]
    fn test_null_exif_is_present_for_owner() {
        let owner = Requester::new(Uuid::new_v4(), UserRole::Photographer);
        let mut record = photo(owner.id, ModerationStatus::Approved);
        record.exif = None;

        let map = serialized(photo_visibility(&record, Some(&owner)));
        assert_eq!(map.get("exif"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_list_item_has_public_point_only() {
        let record = photo(Uuid::new_v4(), ModerationStatus::Approved);
        let value = serde_json::to_value(PhotoListItem::from(&record)).unwrap();

        assert_eq!(value["location"], json!([-122.4180, 37.7760]));
        for key in RESTRICTED {
            assert!(value.get(key).is_none());
        }
    }

    #[test]
    fn test_stored_record_rejects_oversized_blur_radius() {
        let record = photo(Uuid::new_v4(), ModerationStatus::Approved);
        let mut value = serde_json::to_value(&record).unwrap();
        assert_eq!(serde_json::from_value::<PhotoRecord>(value.clone()).unwrap(), record);

        value["blur"]["radius_meters"] = json!(50_000);
        assert!(serde_json::from_value::<PhotoRecord>(value).is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("approved".parse::<ModerationStatus>().unwrap(), ModerationStatus::Approved);
        assert!("flagged".parse::<ModerationStatus>().is_err());
    }
}
