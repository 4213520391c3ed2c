//! Conversation repository trait.

use super::model::Conversation;
use crate::error::{ResponderError, Result};

/// An abstract repository for the conversation list and the active selection.
///
/// The list is stored as a whole; its order is the display order.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Schema versioning and migrations of stored conversations
/// - Skipping (not failing on) individual unreadable records
pub trait ConversationRepository: Send + Sync {
    /// Retrieves all conversations in display order.
    fn get_all(&self) -> Result<Vec<Conversation>>;

    /// Replaces the stored list.
    fn save_all(&self, conversations: &[Conversation]) -> Result<()>;

    /// ID of the active conversation, if one was stored.
    fn active_id(&self) -> Result<Option<i64>>;

    /// Stores the active conversation ID.
    fn set_active_id(&self, id: i64) -> Result<()>;

    /// Finds a conversation by ID.
    fn find_by_id(&self, id: i64) -> Result<Option<Conversation>> {
        Ok(self.get_all()?.into_iter().find(|c| c.id == id))
    }

    /// Loads, mutates and stores one conversation.
    ///
    /// # Errors
    ///
    /// `NotFound` if no conversation has the given ID.
    fn update(&self, id: i64, f: &mut dyn FnMut(&mut Conversation)) -> Result<Conversation> {
        let mut conversations = self.get_all()?;
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ResponderError::not_found("conversation", id.to_string()))?;
        f(conversation);
        let updated = conversation.clone();
        self.save_all(&conversations)?;
        Ok(updated)
    }
}
