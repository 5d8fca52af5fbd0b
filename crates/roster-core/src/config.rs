//! Startup configuration for sources and views

use crate::error::ConfigurationError;
use crate::paths::ConfigPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_BASE_URL: &str = "ROSTER_BASE_URL";
pub const ENV_API_KEY: &str = "ROSTER_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_TIMEOUT_SECS";

/// Largest page the upstream service accepts
pub const MAX_UPSTREAM_LIMIT: usize = 1000;

/// Remote service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the customer/chat service, e.g. `https://api.example.com`
    pub base_url: String,
    /// Sent as `x-api-key` on every request
    pub api_key: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl SourceConfig {
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Sizing knobs for the view adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Cards on the dashboard "recent activity" block
    pub preview_size: usize,
    /// Profile cap for the unified all-customers view
    pub unified_profile_cap: usize,
    /// Profile cap for the preview and paginated list
    pub list_profile_cap: usize,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self {
            preview_size: 5,
            unified_profile_cap: 100,
            list_profile_cap: MAX_UPSTREAM_LIMIT,
        }
    }

    /// Every size is sent upstream as a `limit`, so each must be in `1..=1000`
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_range("views.preview_size", self.preview_size)?;
        check_range("views.unified_profile_cap", self.unified_profile_cap)?;
        check_range("views.list_profile_cap", self.list_profile_cap)?;
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level configuration, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub source: SourceConfig,
    pub views: ViewConfig,
}

impl RosterConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the full configuration: file, then environment, then validation.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match ConfigPaths::new().map(|p| p.config_file()) {
                Some(default_path) if default_path.exists() => {
                    debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)?
                }
                _ => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ROSTER_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigurationError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.source.base_url = base_url;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.source.api_key = api_key;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.source.timeout_secs = timeout.trim().parse().map_err(|_| {
                ConfigurationError::Invalid {
                    key: ENV_TIMEOUT_SECS,
                    reason: format!("not a number of seconds: {timeout:?}"),
                }
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let base_url = self.source.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigurationError::Missing("source.base_url"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigurationError::Invalid {
                key: "source.base_url",
                reason: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }
        if self.source.api_key.trim().is_empty() {
            return Err(ConfigurationError::Missing("source.api_key"));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigurationError::Invalid {
                key: "source.timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        self.views.validate()
    }
}

fn check_range(key: &'static str, value: usize) -> Result<(), ConfigurationError> {
    if value == 0 || value > MAX_UPSTREAM_LIMIT {
        return Err(ConfigurationError::Invalid {
            key,
            reason: format!("must be between 1 and {MAX_UPSTREAM_LIMIT}, got {value}"),
        });
    }
    Ok(())
}
