//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Supabase / PostgREST connection
    #[serde(default)]
    pub store: StoreSettings,

    /// Listing query behavior
    #[serde(default)]
    pub query: QuerySettings,

    /// Logging output
    #[serde(default)]
    pub log: LogSettings,
}

/// Connection settings for the Supabase REST endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    /// PostgREST base URL, e.g. `https://<project>.supabase.co/rest/v1`
    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    /// Anonymous (publishable) key, sent as `apikey`
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Service role key; when set it is used as the bearer token
    #[serde(default)]
    pub service_role_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Table holding full photo rows
    #[serde(default = "default_photos_table")]
    pub photos_table: String,

    /// View used for map listings
    #[serde(default = "default_listings_view")]
    pub listings_view: String,

    /// Table holding user profiles
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            anon_key: None,
            service_role_key: None,
            timeout_secs: default_timeout_secs(),
            photos_table: default_photos_table(),
            listings_view: default_listings_view(),
            profiles_table: default_profiles_table(),
        }
    }
}

impl StoreSettings {
    /// Settings pointing at a local `supabase start` stack
    #[must_use]
    pub fn local() -> Self {
        Self {
            rest_url: "http://localhost:54321/rest/v1".to_string(),
            timeout_secs: 10,
            ..Self::default()
        }
    }

    /// Builder-style method to set the REST URL
    #[must_use]
    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url = url.into();
        self
    }

    /// Builder-style method to set the anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set the service role key
    #[must_use]
    pub fn with_service_role_key(mut self, key: impl Into<String>) -> Self {
        self.service_role_key = Some(key.into());
        self
    }

    /// Whether requests bypass row-level security.
    ///
    /// Owner and moderator reads of non-approved photos need this.
    #[must_use]
    pub fn reads_all_rows(&self) -> bool {
        self.service_role_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Bearer token for requests: service role key if present, else anon key
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.service_role_key.as_deref().or(self.anon_key.as_deref())
    }
}

fn default_rest_url() -> String {
    "http://localhost:54321/rest/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_photos_table() -> String {
    "photos".to_string()
}

fn default_listings_view() -> String {
    "photo_listings".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

/// When the listing endpoint pays for an exact row count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Exact count on the first page, planner estimate afterwards
    #[default]
    FirstPage,
    /// Exact count on every page
    Always,
}

impl std::str::FromStr for CountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_page" => Ok(Self::FirstPage),
            "always" => Ok(Self::Always),
            other => Err(format!("unknown count policy '{other}' (expected first_page or always)")),
        }
    }
}

/// Listing query settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QuerySettings {
    /// Row counting strategy for pagination metadata
    #[serde(default)]
    pub count_policy: CountPolicy,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single line
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected compact or json)")),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for a daily rolling log file, in addition to stderr
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
