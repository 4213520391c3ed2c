//! Platform paths for responder files.
//!
//! ```text
//! ~/.config/responder/         # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/responder/    # Data directory (default store root)
//! ├── freelancerProfile.json
//! ├── conversations.json
//! └── ...
//! ```

use std::path::PathBuf;

use responder_core::error::{ResponderError, Result};

/// Directory name under the platform config and data directories.
pub const APP_DIR_NAME: &str = "responder";

/// Resolves responder paths for the current platform.
pub struct ResponderPaths;

impl ResponderPaths {
    /// Returns the configuration directory (e.g. `~/.config/responder/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ResponderError::config("Cannot find config directory"))
    }

    /// Returns the data directory (e.g. `~/.local/share/responder/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ResponderError::config("Cannot find data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
