//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: Conversation, history item, search result, feedback
//! - `repository`: Repository trait for conversation persistence

mod model;
mod repository;

pub use model::{
    Conversation, DEFAULT_CONVERSATION_PREFIX, Feedback, HistoryItem, SearchResult,
    dedup_search_results,
};
pub use repository::ConversationRepository;
