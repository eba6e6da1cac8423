//! Upload form validation.

use photospot_core::validation::{FieldError, ValidationFailure, ValidationResult, Validator};
use photospot_geo::{GeoPoint, PhotoLocationPair};
use photospot_policy::Requester;
use photospot_query::{BlurRequest, Category, Season, TimeOfDay, UnknownValue};
use photospot_store::NewPhoto;
use rand::Rng;
use serde::Deserialize;
use std::str::FromStr;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Photo creation form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PhotoUpload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    /// Exact longitude, from the form or EXIF
    pub longitude: f64,
    /// Exact latitude, from the form or EXIF
    pub latitude: f64,
    #[serde(flatten)]
    pub blur: BlurRequest,
    #[serde(default)]
    pub exif: Option<serde_json::Value>,
}

impl PhotoUpload {
    /// Validate every field and draw the public location once.
    ///
    /// # Errors
    ///
    /// Returns every offending field.
    pub fn prepare<R: Rng + ?Sized>(self, owner: &Requester, rng: &mut R) -> Result<NewPhoto, ValidationFailure> {
        let (lon, lat) = (self.longitude, self.latitude);
        let mut result = Validator::new()
            .required("title", &self.title)
            .max_length("title", &self.title, MAX_TITLE_CHARS)
            .required("image_url", &self.image_url)
            .custom("longitude", "RANGE", || {
                (!(-180.0..=180.0).contains(&lon)).then(|| "must be between -180 and 180".to_string())
            })
            .custom("latitude", "RANGE", || {
                (!(-90.0..=90.0).contains(&lat)).then(|| "must be between -90 and 90".to_string())
            })
            .validate();

        let category = member::<Category>(Some(self.category.as_str()), Category::FIELD, Category::VALUES, &mut result);
        let season = member::<Season>(self.season.as_deref(), Season::FIELD, Season::VALUES, &mut result);
        let time_of_day =
            member::<TimeOfDay>(self.time_of_day.as_deref(), TimeOfDay::FIELD, TimeOfDay::VALUES, &mut result);
        let blur = self.blur.collect(&mut result);
        result.into_result()?;

        let category = category.ok_or_else(|| {
            ValidationFailure::single(FieldError::new("category", "REQUIRED", "Field is required"))
        })?;
        let location = PhotoLocationPair::create(GeoPoint::new(lon, lat), &blur, rng).map_err(|e| {
            ValidationFailure::single(FieldError::new("location", "RANGE", e.to_string()))
        })?;

        Ok(NewPhoto {
            owner_id: owner.id,
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            image_url: self.image_url,
            thumbnail_url: self.thumbnail_url,
            category,
            season,
            time_of_day,
            location,
            blur,
            exif: self.exif,
        })
    }
}

fn member<T: FromStr<Err = UnknownValue>>(
    value: Option<&str>,
    field: &str,
    allowed: &[&str],
    result: &mut ValidationResult,
) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(member) => Some(member),
        Err(_) => {
            result.add_error(
                FieldError::new(field, "ONE_OF", format!("must be one of: {}", allowed.join(", ")))
                    .expected(allowed.join(", "))
                    .actual(value),
            );
            None
        }
    }
}
