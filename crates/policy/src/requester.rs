//! Who is asking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Account role, as stored on the profile and echoed in auth metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Default for every new account
    #[default]
    Enthusiast,
    /// Public portfolio with business fields
    Photographer,
    /// Reviews uploads
    Moderator,
    /// Full access
    Admin,
}

/// A role string that names no known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl UserRole {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Enthusiast => "enthusiast",
            UserRole::Photographer => "photographer",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }

    /// Whether the role may see unapproved photos and restricted fields.
    #[must_use]
    pub fn is_moderator(&self) -> bool {
        matches!(self, UserRole::Moderator | UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enthusiast" => Ok(UserRole::Enthusiast),
            "photographer" => Ok(UserRole::Photographer),
            "moderator" => Ok(UserRole::Moderator),
            "admin" => Ok(UserRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated caller. Anonymous callers are `None` wherever a
/// `Option<&Requester>` is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Auth user id, equal to the profile id
    pub id: Uuid,
    /// Role claim
    pub role: UserRole,
}

impl Requester {
    /// A caller with an explicit role.
    #[must_use]
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Build from auth metadata, reading the `role` claim.
    ///
    /// A missing or unrecognized claim yields [`UserRole::Enthusiast`], the
    /// least privileged role.
    ///
    /// ```
    /// use photospot_policy::{Requester, UserRole};
    /// use serde_json::json;
    /// use uuid::Uuid;
    ///
    /// let id = Uuid::new_v4();
    /// assert_eq!(Requester::from_metadata(id, &json!({"role": "moderator"})).role, UserRole::Moderator);
    /// assert_eq!(Requester::from_metadata(id, &json!({"role": "root"})).role, UserRole::Enthusiast);
    /// ```
    #[must_use]
    pub fn from_metadata(id: Uuid, metadata: &serde_json::Value) -> Self {
        let role = metadata
            .get("role")
            .and_then(serde_json::Value::as_str)
            .and_then(|role| role.parse().ok())
            .unwrap_or_default();
        Self { id, role }
    }

    /// Whether this caller owns a record.
    #[must_use]
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.id == owner_id
    }

    /// Moderator capability
    #[must_use]
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_moderator_capability() {
        assert!(UserRole::Moderator.is_moderator());
        assert!(UserRole::Admin.is_moderator());
        assert!(!UserRole::Photographer.is_moderator());
        assert!(!UserRole::Enthusiast.is_moderator());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("photographer".parse::<UserRole>().unwrap(), UserRole::Photographer);
        assert_eq!("Admin".parse::<UserRole>().unwrap_err(), UnknownRole("Admin".into()));
    }

    #[test]
    fn test_from_metadata_defaults() {
        let id = Uuid::new_v4();
        assert_eq!(Requester::from_metadata(id, &json!({})).role, UserRole::Enthusiast);
        assert_eq!(Requester::from_metadata(id, &json!({"role": 7})).role, UserRole::Enthusiast);
        assert_eq!(Requester::from_metadata(id, &json!(null)).role, UserRole::Enthusiast);
        assert_eq!(Requester::from_metadata(id, &json!({"role": "admin"})).role, UserRole::Admin);
    }

    #[test]
    fn test_ownership() {
        let id = Uuid::new_v4();
        let requester = Requester::new(id, UserRole::Enthusiast);
        assert!(requester.owns(id));
        assert!(!requester.owns(Uuid::new_v4()));
    }
}
