//! Profile DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use responder_core::profile::{Language, Profile, UserRole};

/// Profile V1.0.0, the browser-era record.
///
/// Role and language were added to that record over time, so either may be
/// missing.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_0_0 {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// Profile V1.1.0 (role and language always present).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_1_0 {
    pub name: String,
    pub role: UserRole,
    pub language: Language,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// Type alias for the latest Profile version.
pub type ProfileDTO = ProfileV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from ProfileV1_0_0 to ProfileV1_1_0.
///
/// Missing role becomes Freelancer, missing or blank language English.
impl MigratesTo<ProfileV1_1_0> for ProfileV1_0_0 {
    fn migrate(self) -> ProfileV1_1_0 {
        ProfileV1_1_0 {
            name: self.name,
            role: self.role.map(UserRole::from).unwrap_or_default(),
            language: self.language.map(Language::from).unwrap_or_default(),
            skills: self.skills,
            experience: self.experience,
            portfolio_url: self.portfolio_url,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<Profile> for ProfileV1_1_0 {
    fn into_domain(self) -> Profile {
        Profile {
            name: self.name,
            role: self.role,
            language: self.language,
            skills: self.skills,
            experience: self.experience,
            portfolio_url: self.portfolio_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

impl FromDomain<Profile> for ProfileV1_1_0 {
    fn from_domain(profile: Profile) -> Self {
        ProfileV1_1_0 {
            name: profile.name,
            role: profile.role,
            language: profile.language,
            skills: profile.skills,
            experience: profile.experience,
            portfolio_url: profile.portfolio_url,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Entity name of the profile migration path.
pub const PROFILE_ENTITY: &str = "profile";

/// Creates and configures a Migrator instance for Profile entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Fills in role (Freelancer) and language (English)
/// - V1.1.0 → Profile: Converts DTO to domain model
pub fn create_profile_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let profile_path = version_migrate::Migrator::define(PROFILE_ENTITY)
        .from::<ProfileV1_0_0>()
        .step::<ProfileV1_1_0>()
        .into_with_save::<Profile>();

    migrator
        .register(profile_path)
        .expect("Failed to register profile migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::stamp_legacy_version;
    use serde_json::json;

    #[test]
    fn test_browser_record_without_role_or_language() {
        let mut value = json!({
            "name": "Mira",
            "skills": "Rust",
            "experience": "3 years",
            "portfolioUrl": ""
        });
        stamp_legacy_version(&mut value);

        let migrator = create_profile_migrator();
        let profile: Profile = migrator.load_flat_from(PROFILE_ENTITY, value).unwrap();

        assert_eq!(profile.name, "Mira");
        assert_eq!(profile.role, UserRole::Freelancer);
        assert_eq!(profile.language, Language::English);
        assert_eq!(profile.portfolio_url, None);
    }

    #[test]
    fn test_browser_record_with_role_keeps_it() {
        let mut value = json!({
            "name": "Ana",
            "role": "Student",
            "language": "Spanish",
            "skills": "Biology",
            "experience": "Lab assistant 2 yrs"
        });
        stamp_legacy_version(&mut value);

        let profile: Profile = create_profile_migrator()
            .load_flat_from(PROFILE_ENTITY, value)
            .unwrap();
        assert_eq!(profile.role, UserRole::Student);
        assert_eq!(profile.language, Language::Spanish);
    }

    #[test]
    fn test_save_writes_latest_version() {
        let migrator = create_profile_migrator();
        let json = migrator
            .save_domain_flat(PROFILE_ENTITY, &Profile::default())
            .unwrap();
        assert!(json.contains("\"version\":\"1.1.0\""));
        assert!(json.contains("\"role\":\"Freelancer\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let loaded: Profile = migrator.load_flat_from(PROFILE_ENTITY, value).unwrap();
        assert_eq!(loaded, Profile::default());
    }
}
