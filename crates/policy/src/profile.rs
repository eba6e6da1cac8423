//! Profile redaction.
//!
//! Business fields (`company_name`, `website_url`, `social_links`) belong to
//! photographer profiles. The owner always gets them back; other viewers get
//! them only when the profile is a photographer's, possibly as `null`.

use crate::requester::{Requester, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Network name to URL, e.g. `"instagram" -> "https://instagram.com/..."`.
pub type SocialLinks = BTreeMap<String, String>;

/// A profile as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Account id
    pub id: Uuid,
    /// Unique handle
    pub username: String,
    /// Name shown instead of the handle
    pub display_name: Option<String>,
    /// Short self-description
    pub bio: Option<String>,
    /// Profile image
    pub avatar_url: Option<String>,
    /// Account role
    pub role: UserRole,
    /// Business name
    pub company_name: Option<String>,
    /// Business website
    pub website_url: Option<String>,
    /// Social network links
    pub social_links: Option<SocialLinks>,
    /// Signup time
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Whether `viewer` may see the photographer business fields.
    #[must_use]
    pub fn shows_business_fields_to(&self, viewer: Option<&Requester>) -> bool {
        self.role == UserRole::Photographer || viewer.is_some_and(|v| v.owns(self.id))
    }
}

/// Outbound profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    /// Account id
    pub id: Uuid,
    /// Unique handle
    pub username: String,
    /// Name shown instead of the handle
    pub display_name: Option<String>,
    /// Short self-description
    pub bio: Option<String>,
    /// Profile image
    pub avatar_url: Option<String>,
    /// Account role
    pub role: UserRole,
    /// Signup time
    pub created_at: DateTime<Utc>,
    /// Business name, absent when hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<Option<String>>,
    /// Business website, absent when hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<Option<String>>,
    /// Social network links, absent when hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Option<SocialLinks>>,
}

impl ProfileView {
    /// Shape `profile` for `viewer` (`None` for anonymous).
    #[must_use]
    pub fn for_viewer(profile: &ProfileRecord, viewer: Option<&Requester>) -> Self {
        let business = profile.shows_business_fields_to(viewer);
        Self {
            id: profile.id,
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            bio: profile.bio.clone(),
            avatar_url: profile.avatar_url.clone(),
            role: profile.role,
            created_at: profile.created_at,
            company_name: business.then(|| profile.company_name.clone()),
            website_url: business.then(|| profile.website_url.clone()),
            social_links: business.then(|| profile.social_links.clone()),
        }
    }
}
