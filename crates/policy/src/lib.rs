//! Visibility policy for PhotoSpot.
//!
//! Pure functions from a stored record plus a caller to the representation
//! that caller may receive:
//!
//! - [`photo_visibility`]: hide unapproved photos, redact exact location,
//!   EXIF and moderation status
//! - [`ProfileView::for_viewer`]: omit photographer business fields on
//!   enthusiast profiles
//!
//! Redacted fields are omitted from the JSON object, never set to `null`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod photo;
pub mod profile;
pub mod requester;

pub use photo::{
    can_view, is_privileged, photo_visibility, ModerationStatus, PhotoListItem, PhotoRecord, PhotoView,
    UnknownStatus, Visibility,
};
pub use profile::{ProfileRecord, ProfileView, SocialLinks};
pub use requester::{Requester, UnknownRole, UserRole};
