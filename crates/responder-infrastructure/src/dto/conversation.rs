//! Conversation DTOs and migrations
//!
//! ### Version History
//! - **1.0.0**: Browser-era record. History items name the model through a
//!   `generationMode` (Fast, Balanced, Thinking) or, in later builds, a
//!   `modelId`.
//! - **1.1.0**: Every history item carries a `modelId`.

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use responder_core::conversation::{Conversation, Feedback, HistoryItem, SearchResult};
use responder_core::generation::{ModelId, ResponseStyle, Tone};

/// History item as stored by the browser build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemV1_0_0 {
    pub id: i64,
    #[serde(default)]
    pub client_message: String,
    #[serde(default)]
    pub generated_response: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub response_style: ResponseStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default)]
    pub search_results: Option<Vec<SearchResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// Conversation V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ConversationV1_0_0 {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub history: Vec<HistoryItemV1_0_0>,
}

/// History item with a resolved model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemV1_1_0 {
    pub id: i64,
    pub client_message: String,
    pub generated_response: String,
    pub tone: Tone,
    pub response_style: ResponseStyle,
    pub model_id: ModelId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// Conversation V1.1.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct ConversationV1_1_0 {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub history: Vec<HistoryItemV1_1_0>,
}

/// Type alias for the latest Conversation version.
pub type ConversationDTO = ConversationV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

impl HistoryItemV1_0_0 {
    /// An explicit model ID wins over the legacy generation mode.
    fn resolve_model(&self) -> ModelId {
        match (&self.model_id, &self.generation_mode) {
            (Some(id), _) => ModelId::from(id.as_str()),
            (None, Some(mode)) => ModelId::from_legacy_mode(mode),
            (None, None) => ModelId::default(),
        }
    }
}

impl MigratesTo<ConversationV1_1_0> for ConversationV1_0_0 {
    fn migrate(self) -> ConversationV1_1_0 {
        let history = self
            .history
            .into_iter()
            .map(|item| HistoryItemV1_1_0 {
                model_id: item.resolve_model(),
                id: item.id,
                client_message: item.client_message,
                generated_response: item.generated_response,
                tone: item.tone,
                response_style: item.response_style,
                search_results: item.search_results.unwrap_or_default(),
                feedback: item.feedback,
            })
            .collect();

        ConversationV1_1_0 {
            id: self.id,
            name: self.name,
            history,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<HistoryItemV1_1_0> for HistoryItem {
    fn from(item: HistoryItemV1_1_0) -> Self {
        HistoryItem {
            id: item.id,
            client_message: item.client_message,
            generated_response: item.generated_response,
            tone: item.tone,
            response_style: item.response_style,
            model_id: item.model_id,
            search_results: item.search_results,
            feedback: item.feedback,
        }
    }
}

impl From<HistoryItem> for HistoryItemV1_1_0 {
    fn from(item: HistoryItem) -> Self {
        HistoryItemV1_1_0 {
            id: item.id,
            client_message: item.client_message,
            generated_response: item.generated_response,
            tone: item.tone,
            response_style: item.response_style,
            model_id: item.model_id,
            search_results: item.search_results,
            feedback: item.feedback,
        }
    }
}

impl IntoDomain<Conversation> for ConversationV1_1_0 {
    fn into_domain(self) -> Conversation {
        Conversation {
            id: self.id,
            name: self.name,
            history: self.history.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromDomain<Conversation> for ConversationV1_1_0 {
    fn from_domain(conversation: Conversation) -> Self {
        ConversationV1_1_0 {
            id: conversation.id,
            name: conversation.name,
            history: conversation.history.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Entity name of the conversation migration path.
pub const CONVERSATION_ENTITY: &str = "conversation";

/// Creates and configures a Migrator instance for Conversation entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Resolves each item's model from `modelId` or the
///   legacy `generationMode`
/// - V1.1.0 → Conversation: Converts DTO to domain model
pub fn create_conversation_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let conversation_path = version_migrate::Migrator::define(CONVERSATION_ENTITY)
        .from::<ConversationV1_0_0>()
        .step::<ConversationV1_1_0>()
        .into_with_save::<Conversation>();

    migrator
        .register(conversation_path)
        .expect("Failed to register conversation migration path");

    migrator
}
