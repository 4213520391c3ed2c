//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of stored records. They are
//! private to the infrastructure layer and handle the evolution of the
//! storage format over time.
//!
//! Records written before versioning was introduced carry no `version`
//! field; [`stamp_legacy_version`] marks them as `1.0.0` before they are
//! handed to a migrator.

mod conversation;
mod profile;

pub use conversation::{
    CONVERSATION_ENTITY, ConversationDTO, ConversationV1_0_0, ConversationV1_1_0,
    HistoryItemV1_0_0, HistoryItemV1_1_0, create_conversation_migrator,
};
pub use profile::{
    PROFILE_ENTITY, ProfileDTO, ProfileV1_0_0, ProfileV1_1_0, create_profile_migrator,
};

/// Version assigned to records without a `version` field.
pub const LEGACY_VERSION: &str = "1.0.0";

/// Adds `"version": "1.0.0"` to a JSON object that has none.
///
/// Non-object values are left untouched.
pub fn stamp_legacy_version(value: &mut serde_json::Value) {
    if let Some(object) = value.as_object_mut() {
        object
            .entry("version")
            .or_insert_with(|| serde_json::Value::String(LEGACY_VERSION.to_string()));
    }
}
