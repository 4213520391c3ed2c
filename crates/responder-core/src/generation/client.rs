//! Contract between the application and a text-generation provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use super::options::{GenerationOptions, ModelId};
use crate::conversation::{SearchResult, dedup_search_results};
use crate::prompt::ComposedPrompt;

/// A single generation request as handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: ModelId,
    pub system_instruction: String,
    pub prompt: String,
    /// Enable the provider's web search grounding tool.
    pub use_search: bool,
    /// Thinking budget in tokens, for models run in thinking mode.
    pub thinking_budget: Option<u32>,
}

impl GenerationRequest {
    /// Builds a request from a composed prompt and the chosen options.
    pub fn new(prompt: ComposedPrompt, options: &GenerationOptions) -> Self {
        Self {
            model: options.model,
            system_instruction: prompt.system_instruction,
            prompt: prompt.user_prompt,
            use_search: options.use_search,
            thinking_budget: options.model.thinking_budget(),
        }
    }
}

/// Raw provider answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub text: String,
    /// Web sources the answer was grounded in, unique by URI.
    pub citations: Vec<SearchResult>,
}

impl GenerationOutput {
    /// Creates an output, dropping duplicate citations.
    pub fn new(text: impl Into<String>, citations: Vec<SearchResult>) -> Self {
        Self {
            text: text.into(),
            citations: dedup_search_results(citations),
        }
    }
}

/// A text-generation backend.
///
/// The application treats the provider as an opaque request/response
/// service; implementations own transport, authentication and the mapping of
/// provider failures onto [`GenerationError`].
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Name of the backend, for logging.
    fn name(&self) -> &str;

    /// Sends one request and returns the generated text with its citations.
    async fn generate(
        &self,
        api_key: &str,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError>;
}
