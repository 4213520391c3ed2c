//! Profile domain model.
//!
//! The profile describes the human the drafted replies speak for: their name,
//! the role that selects the persona template, the language replies must be
//! written in, and the free-text background woven into the instruction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::generation::parse_display;

/// Role of the profile owner; selects the persona template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    Freelancer,
    Student,
    #[strum(to_string = "Business Owner")]
    BusinessOwner,
}

impl From<&str> for UserRole {
    /// Unrecognised roles fall back to `Freelancer`.
    fn from(value: &str) -> Self {
        parse_display(value).unwrap_or_default()
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        value.to_string()
    }
}

/// Language replies are written in.
///
/// The four interface languages are named variants; any other non-empty name
/// is kept verbatim so the language directive still carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Japanese,
    Other(String),
}

impl Language {
    /// The named interface languages.
    pub const KNOWN: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Japanese,
    ];

    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Japanese => "Japanese",
            Language::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Language::default();
        }
        Language::KNOWN
            .into_iter()
            .find(|known| known.name().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| Language::Other(value.to_string()))
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.name().to_string()
    }
}

/// The single active profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Name the replies are signed with
    pub name: String,
    pub role: UserRole,
    pub language: Language,
    /// Skills, areas of study, or what the business specialises in
    pub skills: String,
    /// Experience summary, coursework, or business description
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

impl Profile {
    /// Portfolio URL if one is set and not blank.
    pub fn portfolio(&self) -> Option<&str> {
        self.portfolio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Gordhan Das".to_string(),
            role: UserRole::Freelancer,
            language: Language::English,
            skills: "React, TypeScript, Node.js, Tailwind CSS, UI/UX Design".to_string(),
            experience: "5+ years of experience building high-quality web applications for clients across various industries. I specialize in creating responsive and performant user interfaces.".to_string(),
            portfolio_url: None,
        }
    }
}
