//! Conversation domain model.
//!
//! A conversation is a named thread of request/response pairs. History is
//! kept newest-first: index 0 is the most recent exchange.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::generation::{ModelId, ResponseStyle, Tone};

/// Prefix of automatically assigned conversation names.
pub const DEFAULT_CONVERSATION_PREFIX: &str = "Client Conversation";

/// Longest name derived from a first message, in characters.
const DERIVED_NAME_MAX_CHARS: usize = 40;

/// A web source the generated answer was grounded in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    pub uri: String,
    pub title: String,
}

/// Removes results with a URI already seen, keeping first occurrences in order.
pub fn dedup_search_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| seen.insert(result.uri.clone()))
        .collect()
}

/// User verdict on a generated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Good,
    Bad,
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "up" | "+" => Ok(Feedback::Good),
            "bad" | "down" | "-" => Ok(Feedback::Bad),
            other => Err(format!("unknown feedback '{other}', expected good or bad")),
        }
    }
}

/// One completed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Creation timestamp in milliseconds since the epoch
    pub id: i64,
    pub client_message: String,
    pub generated_response: String,
    pub tone: Tone,
    pub response_style: ResponseStyle,
    pub model_id: ModelId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// A named thread of exchanges with one correspondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Creation timestamp in milliseconds since the epoch
    pub id: i64,
    pub name: String,
    /// Newest first
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            history: Vec::new(),
        }
    }

    /// Default name for the `ordinal`-th conversation (1-based).
    pub fn default_name(ordinal: usize) -> String {
        format!("{DEFAULT_CONVERSATION_PREFIX} {ordinal}")
    }

    /// Whether the name is still an automatically assigned one.
    pub fn has_default_name(&self) -> bool {
        self.name
            .strip_prefix(DEFAULT_CONVERSATION_PREFIX)
            .map(|rest| {
                let rest = rest.trim();
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent exchange.
    pub fn latest(&self) -> Option<&HistoryItem> {
        self.history.first()
    }

    /// Adds a new exchange at the front of the history.
    ///
    /// The first exchange of a conversation still carrying its default name
    /// also renames it after the client message.
    pub fn push_item(&mut self, item: HistoryItem) {
        if self.history.is_empty() && self.has_default_name() {
            if let Some(name) = derive_name(&item.client_message) {
                self.name = name;
            }
        }
        self.history.insert(0, item);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Sets the feedback flag of one exchange. Returns false if no item has that id.
    pub fn set_feedback(&mut self, item_id: i64, feedback: Feedback) -> bool {
        match self.history.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.feedback = Some(feedback);
                true
            }
            None => false,
        }
    }

    /// Exchanges oldest first.
    pub fn chronological(&self) -> impl Iterator<Item = &HistoryItem> {
        self.history.iter().rev()
    }

    /// Plain-text transcript for copying, oldest exchange first.
    pub fn transcript(&self, speaker_name: &str) -> String {
        self.chronological()
            .map(|item| {
                format!(
                    "Client:\n{}\n\nYou ({}):\n{}",
                    item.client_message, speaker_name, item.generated_response
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}

/// Short name taken from the first non-empty line of a message.
fn derive_name(message: &str) -> Option<String> {
    let line = message.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut name: String = line.chars().take(DERIVED_NAME_MAX_CHARS).collect();
    if line.chars().count() > DERIVED_NAME_MAX_CHARS {
        name = format!("{}…", name.trim_end());
    }
    Some(name)
}
