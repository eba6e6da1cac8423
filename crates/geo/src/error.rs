//! Error types for the geo crate.

use crate::bbox::BboxViolation;
use photospot_core::ErrorCode;
use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Coordinate outside the valid range, or not finite
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Radius that is not a positive finite number of meters
    #[error("Invalid radius: {0} (must be a positive, finite number of meters)")]
    InvalidRadius(f64),

    /// Blur radius outside the allowed policy range
    #[error("Blur radius {radius} m is outside {min}..={max} m")]
    BlurRadiusOutOfRange {
        /// Requested radius
        radius: u32,
        /// Smallest allowed radius
        min: u32,
        /// Largest allowed radius
        max: u32,
    },

    /// Bounding box breaking one or more rules
    #[error("Invalid bounding box: {}", join_violations(.0))]
    InvalidBoundingBox(Vec<BboxViolation>),

    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),
}

fn join_violations(violations: &[BboxViolation]) -> String {
    violations
        .iter()
        .map(BboxViolation::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GeoError {
    /// Returns the shared error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => ErrorCode::InvalidCoordinate,
            GeoError::InvalidRadius(_) | GeoError::BlurRadiusOutOfRange { .. } => ErrorCode::InvalidRadius,
            GeoError::InvalidBoundingBox(_) => ErrorCode::InvalidBoundingBox,
            GeoError::InvalidWkt(_) => ErrorCode::InvalidFormat,
        }
    }
}

impl From<GeoError> for photospot_core::Error {
    fn from(err: GeoError) -> Self {
        photospot_core::Error::new(err.code(), err.to_string())
    }
}
