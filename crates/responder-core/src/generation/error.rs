//! Failure categories of a generation request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorised failure of a call to the generation service.
///
/// Providers report errors as status codes plus free-form text; clients map
/// them onto these categories with [`GenerationError::classify`] so the
/// front end can show one consistent message per category.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationError {
    /// The API credential was rejected.
    #[error("API key not valid")]
    InvalidApiKey,

    /// The provider-side quota or rate limit was exceeded.
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider refused the request as malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The provider failed on its end.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The provider could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered without any text.
    #[error("Empty response from generation service")]
    EmptyResponse,

    /// Anything that does not fit the categories above.
    #[error("Generation failed: {0}")]
    Unknown(String),
}

impl GenerationError {
    /// Classifies a provider failure from its HTTP status (if any) and message.
    ///
    /// Message substrings win over the status code because providers reuse
    /// 400 for credential errors.
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("api key not valid")
            || lower.contains("api_key_invalid")
            || lower.contains("permission_denied")
            || matches!(status, Some(401) | Some(403))
        {
            return Self::InvalidApiKey;
        }
        if lower.contains("resource_exhausted")
            || lower.contains("quota")
            || status == Some(429)
        {
            return Self::QuotaExceeded(message);
        }
        if lower.contains("invalid_argument") || status == Some(400) {
            return Self::BadRequest(message);
        }
        if matches!(status, Some(500..=599)) || lower.contains("internal") || lower.contains("unavailable") {
            return Self::ServerError(message);
        }
        if lower.contains("failed to fetch") || lower.contains("network") || lower.contains("connect") {
            return Self::Network(message);
        }
        Self::Unknown(message)
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded(_) | Self::ServerError(_) | Self::Network(_)
        )
    }

    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidApiKey => "API Key Not Valid. Your API key appears to be invalid or has expired. Please enter a valid key to continue.".to_string(),
            Self::QuotaExceeded(_) => "Rate Limit Exceeded. You have made too many requests in a short period. Please wait a moment and try again.".to_string(),
            Self::BadRequest(_) => "Invalid Request. The request sent to the AI was invalid. This can sometimes be caused by the content of the prompt. Please try rephrasing your message.".to_string(),
            Self::ServerError(_) => "Server Error. The AI service is currently experiencing issues on its end. Please try again in a few minutes.".to_string(),
            Self::Network(_) => "Network Error. Could not connect to the AI service. Please check your internet connection.".to_string(),
            Self::EmptyResponse => "The AI service returned an empty response. Please try again.".to_string(),
            Self::Unknown(details) => format!("An unexpected error occurred. Please try again.\n\nDetails: {details}"),
        }
    }
}

/// User-facing hint for a local rate limit rejection.
///
/// Seconds are rounded up so a 200 ms wait still reads "1 second".
pub fn client_rate_limit_message(wait_ms: u64) -> String {
    let seconds = wait_ms.div_ceil(1000).max(1);
    let plural = if seconds == 1 { "" } else { "s" };
    format!(
        "You are making requests too quickly. Please wait {seconds} second{plural} before trying again."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_key_by_message() {
        let err = GenerationError::classify(
            Some(400),
            "INVALID_ARGUMENT: API key not valid. Please pass a valid API key.",
        );
        assert_eq!(err, GenerationError::InvalidApiKey);
    }

    #[test]
    fn test_classify_by_status() {
        assert!(matches!(
            GenerationError::classify(Some(429), "slow down"),
            GenerationError::QuotaExceeded(_)
        ));
        assert!(matches!(
            GenerationError::classify(Some(400), "bad payload"),
            GenerationError::BadRequest(_)
        ));
        assert!(matches!(
            GenerationError::classify(Some(503), "overloaded"),
            GenerationError::ServerError(_)
        ));
        assert!(matches!(
            GenerationError::classify(None, "something odd"),
            GenerationError::Unknown(_)
        ));
    }

    #[test]
    fn test_client_rate_limit_message_pluralization() {
        assert!(client_rate_limit_message(200).contains("wait 1 second before"));
        assert!(client_rate_limit_message(1_000).contains("wait 1 second before"));
        assert!(client_rate_limit_message(42_001).contains("wait 43 seconds"));
    }

    #[test]
    fn test_retryable_categories() {
        assert!(GenerationError::Network("down".into()).is_retryable());
        assert!(!GenerationError::InvalidApiKey.is_retryable());
    }
}
