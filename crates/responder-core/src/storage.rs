//! Local key-value storage abstraction.
//!
//! All persisted state lives under a handful of fixed keys, each holding one
//! JSON document. The trait is synchronous: every consumer (repositories,
//! the rate limiter) reads and writes whole values.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ResponderError, Result};

/// Fixed storage keys.
pub mod keys {
    /// Active profile
    pub const PROFILE: &str = "freelancerProfile";
    /// Conversation list
    pub const CONVERSATIONS: &str = "conversations";
    /// ID of the selected conversation
    pub const ACTIVE_CONVERSATION_ID: &str = "activeConversationId";
    /// Request timestamps of the rate limiter
    pub const RATE_LIMIT_TIMESTAMPS: &str = "api-request-timestamps";
    /// Theme preference
    pub const THEME: &str = "theme";
    /// Generation API credential
    pub const API_KEY: &str = "geminiApiKey";
}

/// A string-keyed store of string values.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store, used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| ResponderError::internal(format!("In-memory store poisoned: {e}")))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
