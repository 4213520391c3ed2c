//! Domain layer of the freelancer response assistant.
//!
//! # Module Structure
//!
//! - `profile`: Who the drafted replies speak for
//! - `conversation`: Conversations and their newest-first history
//! - `generation`: Options, request/response contract and error taxonomy
//! - `prompt`: System instruction and user prompt composition
//! - `rate_limit`: Client-side sliding-window limiter
//! - `settings`: Theme and API key preferences
//! - `storage`: Key-value store abstraction and fixed keys

pub mod conversation;
pub mod error;
pub mod generation;
pub mod profile;
pub mod prompt;
pub mod rate_limit;
pub mod settings;
pub mod storage;

pub use error::ResponderError;
