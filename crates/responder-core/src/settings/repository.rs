//! Settings repository trait.

use super::Theme;
use crate::error::Result;

/// Stores the theme preference and the generation API key.
pub trait SettingsRepository: Send + Sync {
    /// Stored theme, or the default when nothing valid is stored.
    fn theme(&self) -> Result<Theme>;

    fn set_theme(&self, theme: Theme) -> Result<()>;

    /// The stored API key, if any. Blank values count as absent.
    fn api_key(&self) -> Result<Option<String>>;

    fn set_api_key(&self, key: &str) -> Result<()>;

    fn clear_api_key(&self) -> Result<()>;
}
