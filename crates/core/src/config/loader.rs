//! Configuration file loading and environment overlay

use super::schema::AppConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Standard locations searched when no explicit path is given
const CANDIDATES: [&str; 3] = ["photospot.toml", ".photospot.toml", ".config/photospot.toml"];

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective settings
    pub schema: AppConfig,
    /// File the settings were read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit `path` must exist. Without one, the standard locations are
    /// searched and defaults are used when none is present.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => AppConfig::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load from file, overlay the process environment and validate
    ///
    /// This is the one place the process environment is read.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, unparseable overrides or invalid values.
    pub fn from_env(path: Option<&Path>) -> Result<Self> {
        let config = Self::load(path)?.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values supplied by `lookup`
    ///
    /// Recognized keys:
    /// - `PHOTOSPOT_REST_URL`, or `SUPABASE_URL` with `/rest/v1` appended
    /// - `SUPABASE_ANON_KEY`, `SUPABASE_SERVICE_ROLE_KEY`
    /// - `PHOTOSPOT_TIMEOUT_SECS`
    /// - `PHOTOSPOT_COUNT_POLICY` (`first_page` | `always`)
    /// - `PHOTOSPOT_LOG`, `PHOTOSPOT_LOG_FORMAT`, `PHOTOSPOT_LOG_DIR`
    ///
    /// # Errors
    ///
    /// Fails when a recognized key holds an unparseable value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = &mut self.schema.store;

        if let Some(url) = lookup("PHOTOSPOT_REST_URL") {
            store.rest_url = url;
        } else if let Some(url) = lookup("SUPABASE_URL") {
            store.rest_url = format!("{}/rest/v1", url.trim_end_matches('/'));
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            store.anon_key = Some(key);
        }
        if let Some(key) = lookup("SUPABASE_SERVICE_ROLE_KEY") {
            store.service_role_key = Some(key);
        }
        if let Some(secs) = lookup("PHOTOSPOT_TIMEOUT_SECS") {
            store.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::invalid_config("PHOTOSPOT_TIMEOUT_SECS", format!("Not a number of seconds: {secs}"))
            })?;
        }

        if let Some(policy) = lookup("PHOTOSPOT_COUNT_POLICY") {
            self.schema.query.count_policy = policy
                .parse()
                .map_err(|e: String| Error::invalid_config("PHOTOSPOT_COUNT_POLICY", e))?;
        }

        let log = &mut self.schema.log;
        if let Some(level) = lookup("PHOTOSPOT_LOG") {
            log.level = level;
        }
        if let Some(format) = lookup("PHOTOSPOT_LOG_FORMAT") {
            log.format = format
                .parse()
                .map_err(|e: String| Error::invalid_config("PHOTOSPOT_LOG_FORMAT", e))?;
        }
        if let Some(dir) = lookup("PHOTOSPOT_LOG_DIR") {
            log.directory = Some(PathBuf::from(dir));
        }

        Ok(self)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Fails on an empty or non-HTTP REST URL or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let store = &self.schema.store;

        if store.rest_url.is_empty() {
            return Err(Error::invalid_config("store.rest_url", "rest_url cannot be empty"));
        }
        if !store.rest_url.starts_with("http://") && !store.rest_url.starts_with("https://") {
            return Err(Error::invalid_config(
                "store.rest_url",
                "rest_url must start with http:// or https://",
            ));
        }
        if store.timeout_secs == 0 {
            return Err(Error::invalid_config("store.timeout_secs", "timeout cannot be zero"));
        }

        Ok(())
    }
}

/// Find a configuration file in the standard locations
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}
