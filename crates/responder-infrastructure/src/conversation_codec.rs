//! Versioned JSON encoding of conversations.
//!
//! Shared by the conversation repository, export/import and share links so
//! every path writes the latest schema and reads any older one.

use serde_json::Value;
use tracing::warn;

use crate::dto::{CONVERSATION_ENTITY, create_conversation_migrator, stamp_legacy_version};
use responder_core::conversation::Conversation;
use responder_core::error::{ResponderError, Result};

/// Encodes one conversation as a flat versioned JSON object.
pub fn encode_conversation(conversation: &Conversation) -> Result<Value> {
    let migrator = create_conversation_migrator();
    let json = migrator.save_domain_flat(CONVERSATION_ENTITY, conversation)?;
    Ok(serde_json::from_str(&json)?)
}

/// Encodes a list as a JSON array of versioned objects.
pub fn encode_conversations(conversations: &[Conversation]) -> Result<Value> {
    conversations
        .iter()
        .map(encode_conversation)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Decodes one conversation of any known version.
pub fn decode_conversation(mut value: Value) -> Result<Conversation> {
    if !value.is_object() {
        return Err(ResponderError::serialization(
            "JSON",
            "Conversation record is not an object",
        ));
    }
    stamp_legacy_version(&mut value);
    let migrator = create_conversation_migrator();
    Ok(migrator.load_flat_from(CONVERSATION_ENTITY, value)?)
}

/// Decodes a JSON array of conversations, or a single conversation object.
///
/// Entries that cannot be decoded are skipped with a warning.
pub fn decode_conversations(value: Value) -> Result<Vec<Conversation>> {
    let entries = match value {
        Value::Array(entries) => entries,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(ResponderError::serialization(
                "JSON",
                format!("Expected a conversation or a list of conversations, got {other}"),
            ));
        }
    };

    let total = entries.len();
    let conversations: Vec<Conversation> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match decode_conversation(entry) {
            Ok(conversation) => Some(conversation),
            Err(e) => {
                warn!("Skipping unreadable conversation at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if conversations.len() < total {
        warn!(
            "Loaded {} of {} stored conversations",
            conversations.len(),
            total
        );
    }
    Ok(conversations)
}

/// Parses and decodes a JSON document; see [`decode_conversations`].
pub fn parse_conversations(json: &str) -> Result<Vec<Conversation>> {
    decode_conversations(serde_json::from_str(json)?)
}

/// Pretty-printed export document.
pub fn export_json(conversations: &[Conversation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&encode_conversations(
        conversations,
    )?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_entries_are_skipped() {
        let conversations = decode_conversations(json!([
            {"id": 1, "name": "Good", "history": []},
            "not an object",
            {"name": "missing id"},
            {"id": 2, "name": "Also good", "version": "1.1.0", "history": []}
        ]))
        .unwrap();

        let names: Vec<_> = conversations.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also good"]);
    }

    #[test]
    fn test_single_object_is_accepted() {
        let conversations = decode_conversations(json!({"id": 7, "name": "Solo"})).unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].id, 7);
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(decode_conversations(json!(42)).unwrap_err().is_serialization());
    }

    #[test]
    fn test_export_is_versioned() {
        let exported = export_json(&[Conversation::new(1, "A"), Conversation::new(2, "B")]).unwrap();
        let value: Value = serde_json::from_str(&exported).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e["version"] == "1.1.0"));
        assert_eq!(parse_conversations(&exported).unwrap().len(), 2);
    }
}
