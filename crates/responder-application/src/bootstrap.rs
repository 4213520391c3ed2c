//! Wiring of the production object graph.

use std::path::PathBuf;
use std::sync::Arc;

use responder_core::error::Result;
use responder_core::generation::GenerationClient;
use responder_core::rate_limit::{Clock, RateLimiter, SystemClock};
use responder_core::storage::KeyValueStore;
use responder_infrastructure::{
    AppConfig, JsonFileStore, KvConversationRepository, KvProfileRepository, KvSettingsRepository,
};
use responder_interaction::GeminiApiClient;

use crate::ResponderUseCase;

pub struct AppBootstrap {
    pub usecase: ResponderUseCase,
    pub data_dir: PathBuf,
}

/// Builds a use case over `store` with the given client and clock.
pub fn build_usecase(
    store: Arc<dyn KeyValueStore>,
    config: &AppConfig,
    client: Arc<dyn GenerationClient>,
    clock: Arc<dyn Clock>,
) -> ResponderUseCase {
    let rate_limiter = RateLimiter::with_clock(store.clone(), clock.clone(), config.rate_limit);

    ResponderUseCase::new(
        Arc::new(KvProfileRepository::new(store.clone())),
        Arc::new(KvConversationRepository::new(store.clone())),
        Arc::new(KvSettingsRepository::new(store)),
        rate_limiter,
        client,
        clock,
    )
    .with_share_base_url(config.share_base_url.clone())
    .with_api_key_override(AppConfig::api_key_override())
}

/// Opens the file store from `config` and wires the Gemini client.
pub fn bootstrap(config: &AppConfig) -> Result<AppBootstrap> {
    let data_dir = config.resolve_data_dir()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&data_dir)?);
    let client = Arc::new(GeminiApiClient::new().with_base_url(config.gemini.base_url.clone()));

    tracing::info!("[Bootstrap] Using data directory {}", data_dir.display());

    Ok(AppBootstrap {
        usecase: build_usecase(store, config, client, Arc::new(SystemClock)),
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bootstrap_persists_into_configured_data_dir() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: Some(temp.path().join("data")),
            ..AppConfig::default()
        };

        let app = bootstrap(&config).unwrap();
        assert_eq!(app.data_dir, temp.path().join("data"));

        let snapshot = app.usecase.initialize().await.unwrap();
        assert_eq!(snapshot.conversations.len(), 1);
        assert!(app.data_dir.join("conversations.json").exists());
        assert!(app.data_dir.join("freelancerProfile.json").exists());
    }
}
