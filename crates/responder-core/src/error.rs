//! Error type shared by every Responder crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::GenerationError;

/// Failure of any Responder operation.
///
/// Storage, codec and migration failures are folded into a few variants;
/// the generation service keeps its own category in [`GenerationError`].
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ResponderError {
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// File system failure in the local store
    #[error("IO error: {message}")]
    Io { message: String },

    /// Stored or imported data could not be read or written in `format`
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A versioned record has no path to the current schema
    #[error("Migration error: {0}")]
    Migration(String),

    /// Rejected user input: blank message, blank name, empty import
    #[error("Validation error: {0}")]
    Validation(String),

    /// The local request budget is exhausted
    #[error("Rate limited: retry in {wait_ms} ms")]
    RateLimited { wait_ms: u64 },

    #[error(transparent)]
    Generation(GenerationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponderError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Unreadable JSON, TOML, base64 or versioned data.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Text for the end user.
    ///
    /// Generation failures and local rate limiting have dedicated wording;
    /// anything else is shown in its `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited { wait_ms } => crate::generation::client_rate_limit_message(*wait_ms),
            Self::Generation(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for ResponderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ResponderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ResponderError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ResponderError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for ResponderError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for ResponderError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::EntityNotFound(id) => Self::not_found("entity", id),
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            _ => Self::Migration(err.to_string()),
        }
    }
}

impl From<GenerationError> for ResponderError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}

pub type Result<T> = std::result::Result<T, ResponderError>;
