//! Field-level input validation
//!
//! Validation never stops at the first problem: every violated field and
//! rule is recorded so a client can fix its request in one round trip.
//!
//! # Example
//!
//! ```rust
//! use photospot_core::validation::Validator;
//!
//! let failure = Validator::new()
//!     .required("title", "")
//!     .custom("blur_radius", "RANGE", || Some("must be between 100 and 500".to_string()))
//!     .validate()
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(failure.errors.len(), 2);
//! assert_eq!(failure.errors[0].field, "title");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single violated rule on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Machine-readable rule code
    pub code: String,
    /// Expected value (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl FieldError {
    /// Create an error for `field` with a rule code and message
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            expected: None,
            actual: None,
        }
    }

    /// Record what the rule expected
    #[must_use]
    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Record the offending value
    #[must_use]
    pub fn actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Convert into a `Result`, failing with every collected error
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] when at least one rule was violated.
    pub fn into_result(self) -> std::result::Result<(), ValidationFailure> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailure { errors: self.errors })
        }
    }
}

/// Rejected input, carrying every violated rule
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Violations in discovery order
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// Failure with a single violation
    #[must_use]
    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    /// Whether any violation concerns `field`
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Names of the offending fields, deduplicated, in discovery order
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(&error.field);
            }
        }
        fields
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "Validation failed: {}", messages.join("; "))
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not blank
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(
                FieldError::new(field, "REQUIRED", "Field is required")
                    .expected("non-empty value")
                    .actual("empty"),
            );
        }
        self
    }

    /// Validate maximum length in characters
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.add_error(
                FieldError::new(field, "MAX_LENGTH", format!("Must be at most {max} characters"))
                    .expected(format!("<= {max} chars"))
                    .actual(format!("{len} chars")),
            );
        }
        self
    }

    /// Add a custom validation; the closure returns a message on failure
    #[must_use]
    pub fn custom<F>(mut self, field: &str, code: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(FieldError::new(field, code, message));
        }
        self
    }

    /// Complete validation and return the accumulated result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
