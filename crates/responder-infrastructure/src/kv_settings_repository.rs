//! SettingsRepository over a key-value store.

use std::sync::Arc;
use tracing::warn;

use responder_core::error::Result;
use responder_core::settings::{SettingsRepository, Theme};
use responder_core::storage::{KeyValueStore, keys};

/// Theme and API key kept as plain strings under [`keys::THEME`] and
/// [`keys::API_KEY`].
pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl SettingsRepository for KvSettingsRepository {
    fn theme(&self) -> Result<Theme> {
        let Some(raw) = self.store.get(keys::THEME)? else {
            return Ok(Theme::default());
        };
        Ok(raw.trim().trim_matches('"').parse().unwrap_or_else(|e| {
            warn!("Ignoring stored theme: {}", e);
            Theme::default()
        }))
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(keys::THEME, &theme.to_string())
    }

    fn api_key(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(keys::API_KEY)?
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty()))
    }

    fn set_api_key(&self, key: &str) -> Result<()> {
        self.store.set(keys::API_KEY, key.trim())
    }

    fn clear_api_key(&self) -> Result<()> {
        self.store.remove(keys::API_KEY)
    }
}
