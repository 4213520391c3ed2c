//! File-backed [`KeyValueStore`].
//!
//! One file per key under a data directory:
//!
//! ```text
//! <data_dir>/
//! ├── freelancerProfile.json
//! ├── conversations.json
//! ├── activeConversationId.json
//! ├── api-request-timestamps.json
//! └── ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use responder_core::error::{ResponderError, Result};
use responder_core::storage::KeyValueStore;
use tracing::debug;

use super::atomic_file::AtomicFile;

/// Key-value store keeping each value in its own file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            ResponderError::io(format!(
                "Failed to create data directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        debug!("Opened file store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let name = sanitize_key(key);
        if name.is_empty() {
            return Err(ResponderError::validation(format!(
                "Invalid storage key '{key}'"
            )));
        }
        Ok(AtomicFile::new(self.root.join(format!("{name}.json"))))
    }
}

/// Maps a key to a safe file stem: ASCII alphanumerics, `-`, `_` and `.`
/// are kept, everything else becomes `_`. Leading dots are stripped.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.file_for(key)?.load()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file_for(key)?.save(value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file_for(key)?.remove()
    }
}
