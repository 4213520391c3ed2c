//! User preferences that are not part of the profile.

mod repository;

pub use repository::SettingsRepository;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::generation::parse_display;

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::error::ResponderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_display(s).ok_or_else(|| {
            crate::error::ResponderError::validation(format!(
                "Unknown theme '{s}' (expected 'dark' or 'light')"
            ))
        })
    }
}
