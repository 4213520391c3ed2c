//! Profile repository trait.

use super::model::Profile;
use crate::error::Result;

/// An abstract repository for the active profile.
///
/// Implementations handle schema versioning of the stored record.
pub trait ProfileRepository: Send + Sync {
    /// Loads the stored profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))`: Profile found
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(ResponderError)`: Storage or migration failure
    fn load(&self) -> Result<Option<Profile>>;

    /// Replaces the stored profile.
    fn save(&self, profile: &Profile) -> Result<()>;

    /// Loads the stored profile, creating and persisting the default one
    /// when nothing is stored yet.
    fn load_or_init(&self) -> Result<Profile> {
        match self.load()? {
            Some(profile) => Ok(profile),
            None => {
                let profile = Profile::default();
                self.save(&profile)?;
                Ok(profile)
            }
        }
    }
}
