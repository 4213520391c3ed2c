//! ProfileRepository over a key-value store.

use std::sync::Arc;
use tracing::warn;

use crate::dto::{PROFILE_ENTITY, create_profile_migrator, stamp_legacy_version};
use responder_core::error::Result;
use responder_core::profile::{Profile, ProfileRepository};
use responder_core::storage::{KeyValueStore, keys};

/// Stores the profile as a versioned JSON object under
/// [`keys::PROFILE`].
///
/// An unreadable record is treated as absent so the default profile takes
/// its place.
pub struct KvProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn decode(raw: &str) -> Result<Profile> {
        let mut value: serde_json::Value = serde_json::from_str(raw)?;
        stamp_legacy_version(&mut value);
        Ok(create_profile_migrator().load_flat_from(PROFILE_ENTITY, value)?)
    }
}

impl ProfileRepository for KvProfileRepository {
    fn load(&self) -> Result<Option<Profile>> {
        let Some(raw) = self.store.get(keys::PROFILE)? else {
            return Ok(None);
        };

        match Self::decode(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Ignoring unreadable stored profile: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let json = create_profile_migrator().save_domain_flat(PROFILE_ENTITY, profile)?;
        self.store.set(keys::PROFILE, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use responder_core::profile::{Language, UserRole};
    use responder_core::storage::InMemoryStore;

    #[test]
    fn test_load_or_init_persists_default() {
        let store = Arc::new(InMemoryStore::new());
        let repo = KvProfileRepository::new(store.clone());

        assert_eq!(repo.load().unwrap(), None);
        let profile = repo.load_or_init().unwrap();
        assert_eq!(profile, Profile::default());
        assert!(store.get(keys::PROFILE).unwrap().unwrap().contains("\"version\""));
    }

    #[test]
    fn test_save_and_load() {
        let repo = KvProfileRepository::new(Arc::new(InMemoryStore::new()));
        let profile = Profile {
            name: "Ana".to_string(),
            role: UserRole::Student,
            language: Language::Spanish,
            skills: "Biology".to_string(),
            experience: "Lab assistant 2 yrs".to_string(),
            portfolio_url: Some("https://ana.dev".to_string()),
        };
        repo.save(&profile).unwrap();
        assert_eq!(repo.load().unwrap(), Some(profile));
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let store = Arc::new(InMemoryStore::with_entries([(keys::PROFILE, "{oops")]));
        let repo = KvProfileRepository::new(store);
        assert_eq!(repo.load().unwrap(), None);
        assert_eq!(repo.load_or_init().unwrap(), Profile::default());
    }
}
