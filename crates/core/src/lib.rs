//! Core utilities shared by the PhotoSpot crates
//!
//! This crate provides the ambient pieces every other crate leans on:
//!
//! - **Errors**: one code numbering shared by every crate
//! - **Validation**: field-level checks that collect every violation
//! - **Configuration**: TOML file plus environment overlay, built once at startup
//!
//! # Example
//!
//! ```rust
//! use photospot_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("image_url", " ")
//!     .max_length("title", "Half Dome at dawn", 10)
//!     .validate();
//!
//! assert_eq!(result.errors().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AppConfig, CountPolicy, LogFormat, LogSettings, QuerySettings, StoreSettings};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{FieldError, ValidationFailure, ValidationResult, Validator};
}
