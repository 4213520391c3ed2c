//! Per-request generation options.
//!
//! Tone, response style and model are chosen per request and captured on each
//! history item once a generation completes. Every enum here parses from its
//! display string and degrades to its default on unknown input instead of
//! failing, so a stale or hand-edited value never blocks drafting.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Register of the drafted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    #[default]
    Casual,
    Formal,
    Enthusiastic,
}

impl From<&str> for Tone {
    fn from(value: &str) -> Self {
        parse_display(value).unwrap_or_default()
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Tone> for String {
    fn from(value: Tone) -> Self {
        value.to_string()
    }
}

/// Target length and level of detail of the drafted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStyle {
    #[default]
    Default,
    #[strum(to_string = "Short & Sweet")]
    ShortAndSweet,
    #[strum(to_string = "Detailed Explanation")]
    DetailedExplanation,
}

impl From<&str> for ResponseStyle {
    fn from(value: &str) -> Self {
        parse_display(value).unwrap_or_default()
    }
}

impl From<String> for ResponseStyle {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ResponseStyle> for String {
    fn from(value: ResponseStyle) -> Self {
        value.to_string()
    }
}

/// Thinking budget granted to the Pro model.
pub const PRO_THINKING_BUDGET: u32 = 32_768;

/// Supported generation models.
///
/// Serialized as the provider's model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelId {
    FlashLite,
    #[default]
    Flash,
    Pro,
}

impl ModelId {
    /// Provider model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::FlashLite => "gemini-flash-lite-latest",
            ModelId::Flash => "gemini-2.5-flash",
            ModelId::Pro => "gemini-2.5-pro",
        }
    }

    /// Human readable model name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelId::FlashLite => "Flash Lite",
            ModelId::Flash => "Flash",
            ModelId::Pro => "Pro",
        }
    }

    /// Thinking budget to request, if the model is run in thinking mode.
    pub fn thinking_budget(&self) -> Option<u32> {
        match self {
            ModelId::Pro => Some(PRO_THINKING_BUDGET),
            _ => None,
        }
    }

    /// Maps the retired `generationMode` values onto models.
    ///
    /// `Fast` → Flash Lite, `Thinking` → Pro, anything else → Flash.
    pub fn from_legacy_mode(mode: &str) -> Self {
        match mode.trim() {
            "Fast" => ModelId::FlashLite,
            "Thinking" => ModelId::Pro,
            _ => ModelId::Flash,
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        let value = value.trim();
        ModelId::iter()
            .find(|model| model.as_str() == value || model.display_name().eq_ignore_ascii_case(value))
            .unwrap_or_default()
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ModelId> for String {
    fn from(value: ModelId) -> Self {
        value.as_str().to_string()
    }
}

/// Options chosen for a single generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub tone: Tone,
    pub style: ResponseStyle,
    pub model: ModelId,
    /// Let the model ground its answer in web search results.
    pub use_search: bool,
}

/// Case-insensitive match against an enum's display strings or variant names.
pub(crate) fn parse_display<T>(value: &str) -> Option<T>
where
    T: IntoEnumIterator + std::fmt::Display + std::fmt::Debug,
{
    let value = value.trim();
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect();
    T::iter().find(|candidate| {
        candidate.to_string().eq_ignore_ascii_case(value)
            || format!("{candidate:?}").eq_ignore_ascii_case(&compact)
    })
}
