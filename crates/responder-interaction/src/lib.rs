//! Generation service clients.

pub mod gemini_api_client;

pub use gemini_api_client::GeminiApiClient;
