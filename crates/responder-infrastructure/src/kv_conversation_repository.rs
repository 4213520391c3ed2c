//! ConversationRepository over a key-value store.

use std::sync::Arc;
use tracing::warn;

use crate::conversation_codec::{encode_conversations, parse_conversations};
use responder_core::conversation::{Conversation, ConversationRepository};
use responder_core::error::Result;
use responder_core::storage::{KeyValueStore, keys};

/// Stores the conversation list under [`keys::CONVERSATIONS`] and the
/// selection under [`keys::ACTIVE_CONVERSATION_ID`].
///
/// Responsibilities:
/// - Migrate each stored conversation to the latest schema
/// - Skip individual unreadable conversations
///
/// A list document that is not valid JSON at all is reported as an error
/// rather than replaced.
pub struct KvConversationRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvConversationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

/// Parses a stored active ID; both `123` and `"123"` are accepted.
fn parse_active_id(raw: &str) -> Option<i64> {
    raw.trim().trim_matches('"').parse().ok()
}

impl ConversationRepository for KvConversationRepository {
    fn get_all(&self) -> Result<Vec<Conversation>> {
        match self.store.get(keys::CONVERSATIONS)? {
            Some(raw) if !raw.trim().is_empty() => parse_conversations(&raw),
            _ => Ok(Vec::new()),
        }
    }

    fn save_all(&self, conversations: &[Conversation]) -> Result<()> {
        let json = serde_json::to_string(&encode_conversations(conversations)?)?;
        self.store.set(keys::CONVERSATIONS, &json)
    }

    fn active_id(&self) -> Result<Option<i64>> {
        let Some(raw) = self.store.get(keys::ACTIVE_CONVERSATION_ID)? else {
            return Ok(None);
        };
        let id = parse_active_id(&raw);
        if id.is_none() {
            warn!("Ignoring unreadable active conversation ID '{}'", raw);
        }
        Ok(id)
    }

    fn set_active_id(&self, id: i64) -> Result<()> {
        self.store.set(keys::ACTIVE_CONVERSATION_ID, &id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use responder_core::generation::ModelId;
    use responder_core::storage::InMemoryStore;

    #[test]
    fn test_empty_store() {
        let repo = KvConversationRepository::new(Arc::new(InMemoryStore::new()));
        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(repo.active_id().unwrap(), None);
    }

    #[test]
    fn test_save_all_and_reload() {
        let store = Arc::new(InMemoryStore::new());
        let repo = KvConversationRepository::new(store.clone());
        let list = vec![Conversation::new(1, "First"), Conversation::new(2, "Second")];

        repo.save_all(&list).unwrap();
        repo.set_active_id(2).unwrap();

        assert_eq!(repo.get_all().unwrap(), list);
        assert_eq!(repo.active_id().unwrap(), Some(2));
        assert_eq!(store.get(keys::ACTIVE_CONVERSATION_ID).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_browser_data_is_migrated_and_bad_entries_skipped() {
        let raw = r#"[
            {"id": 1, "name": "Client Conversation 1", "history": [
                {"id": 5, "clientMessage": "hi", "generatedResponse": "hello",
                 "tone": "Casual", "responseStyle": "Default", "generationMode": "Fast"}
            ]},
            {"name": "no id"}
        ]"#;
        let store = Arc::new(InMemoryStore::with_entries([
            (keys::CONVERSATIONS, raw),
            (keys::ACTIVE_CONVERSATION_ID, "\"1\""),
        ]));
        let repo = KvConversationRepository::new(store);

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].history[0].model_id, ModelId::FlashLite);
        assert_eq!(repo.active_id().unwrap(), Some(1));
    }

    #[test]
    fn test_corrupt_list_is_an_error() {
        let store = Arc::new(InMemoryStore::with_entries([(keys::CONVERSATIONS, "[{")]));
        let repo = KvConversationRepository::new(store);
        assert!(repo.get_all().unwrap_err().is_serialization());
    }

    #[test]
    fn test_update_through_trait_default() {
        let repo = KvConversationRepository::new(Arc::new(InMemoryStore::new()));
        repo.save_all(&[Conversation::new(1, "Old")]).unwrap();

        let updated = repo.update(1, &mut |c| c.name = "New".to_string()).unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(repo.find_by_id(1).unwrap().unwrap().name, "New");
        assert!(repo.update(99, &mut |_| {}).unwrap_err().is_not_found());
    }
}
