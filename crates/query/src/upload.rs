//! Location-privacy fields of the upload form.

use photospot_core::validation::{FieldError, ValidationFailure, ValidationResult};
use photospot_geo::{BlurSettings, MAX_BLUR_RADIUS_M, MIN_BLUR_RADIUS_M};
use serde::{Deserialize, Serialize};

/// `blur_location` / `blur_radius` as submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurRequest {
    /// Whether to displace the public pin
    pub blur_location: bool,
    /// Radius in meters; ignored when blurring is off
    pub blur_radius: Option<i64>,
}

impl BlurRequest {
    /// Blurring with an optional explicit radius.
    #[must_use]
    pub fn enabled(radius: Option<i64>) -> Self {
        Self {
            blur_location: true,
            blur_radius: radius,
        }
    }

    /// Resolve to settings.
    ///
    /// # Errors
    ///
    /// Fails on `blur_radius` when blurring is on and the radius is outside 100..=500.
    pub fn to_settings(&self) -> Result<BlurSettings, ValidationFailure> {
        let mut result = ValidationResult::new();
        let settings = self.collect(&mut result);
        result.into_result()?;
        Ok(settings)
    }

    /// Resolve into an accumulating result; returns disabled settings on error.
    pub fn collect(&self, result: &mut ValidationResult) -> BlurSettings {
        if !self.blur_location {
            return BlurSettings::disabled();
        }
        let Some(radius) = self.blur_radius else {
            return BlurSettings::default_enabled();
        };

        match u32::try_from(radius).ok().map(BlurSettings::with_radius) {
            Some(Ok(settings)) => settings,
            _ => {
                result.add_error(
                    FieldError::new(
                        "blur_radius",
                        "RANGE",
                        format!("must be between {MIN_BLUR_RADIUS_M} and {MAX_BLUR_RADIUS_M} meters"),
                    )
                    .expected(format!("{MIN_BLUR_RADIUS_M} - {MAX_BLUR_RADIUS_M}"))
                    .actual(radius.to_string()),
                );
                BlurSettings::disabled()
            }
        }
    }
}

impl From<BlurSettings> for BlurRequest {
    fn from(settings: BlurSettings) -> Self {
        Self {
            blur_location: settings.is_enabled(),
            blur_radius: settings.radius_meters().map(i64::from),
        }
    }
}
