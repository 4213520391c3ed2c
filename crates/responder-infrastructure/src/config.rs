//! Application configuration file.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/responder"
//! log_level = "info"
//! share_base_url = "https://responder.app/"
//!
//! [rate_limit]
//! max_requests = 5
//! window_ms = 60000
//!
//! [gemini]
//! base_url = "https://generativelanguage.googleapis.com/v1beta/models"
//! default_model = "gemini-2.5-flash"
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::paths::ResponderPaths;
use responder_core::error::{ResponderError, Result};
use responder_core::generation::ModelId;
use responder_core::rate_limit::RateLimitConfig;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://responder.app/";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Gemini endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    pub default_model: ModelId,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            default_model: ModelId::default(),
        }
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store root; the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    /// Prefix of share links
    pub share_base_url: String,
    pub rate_limit: RateLimitConfig,
    pub gemini: GeminiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            rate_limit: RateLimitConfig::default(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the platform
    /// config file is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = ResponderPaths::config_file()?;
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    debug!("No config file at {}, using defaults", default_path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and validates a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ResponderError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.rate_limit.max_requests == 0 {
            return Err(ResponderError::config(
                "rate_limit.max_requests must be at least 1",
            ));
        }
        if self.rate_limit.window_ms <= 0 {
            return Err(ResponderError::config(
                "rate_limit.window_ms must be positive",
            ));
        }
        if self.gemini.base_url.trim().is_empty() {
            return Err(ResponderError::config("gemini.base_url must not be empty"));
        }
        Ok(())
    }

    /// Store root to use.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => ResponderPaths::data_dir(),
        }
    }

    /// API key from the environment, if set and not blank.
    pub fn api_key_override() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Serialized form, for writing a starter config file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
