//! PhotoSpot request handling
//!
//! [`PhotoService`] ties query parsing, visibility policy and storage
//! together for the listing, detail, profile and upload operations. Every
//! failure surfaces as a [`ServiceError`] that renders to an [`ErrorBody`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod service;
mod upload;

pub use error::{ErrorBody, ServiceError, ServiceResult};
pub use service::PhotoService;
pub use upload::{PhotoUpload, MAX_TITLE_CHARS};
