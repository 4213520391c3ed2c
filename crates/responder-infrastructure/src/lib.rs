pub mod config;
pub mod conversation_codec;
pub mod dto;
pub mod kv_conversation_repository;
pub mod kv_profile_repository;
pub mod kv_settings_repository;
pub mod paths;
pub mod share;
pub mod storage;

pub use crate::config::AppConfig;
pub use crate::kv_conversation_repository::KvConversationRepository;
pub use crate::kv_profile_repository::KvProfileRepository;
pub use crate::kv_settings_repository::KvSettingsRepository;
pub use crate::storage::JsonFileStore;
