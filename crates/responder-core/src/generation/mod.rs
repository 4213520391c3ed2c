//! Generation domain module.
//!
//! # Module Structure
//!
//! - `options`: Tone, response style, model selection
//! - `client`: Provider contract (`GenerationClient`) and request/response types
//! - `error`: Provider failure categories

mod client;
mod error;
mod options;

pub use client::{GenerationClient, GenerationOutput, GenerationRequest};
pub use error::{GenerationError, client_rate_limit_message};
pub use options::{GenerationOptions, ModelId, PRO_THINKING_BUDGET, ResponseStyle, Tone};
pub(crate) use options::parse_display;
