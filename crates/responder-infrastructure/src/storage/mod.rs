//! File-backed storage.

mod atomic_file;
mod json_file_store;

pub use atomic_file::AtomicFile;
pub use json_file_store::{JsonFileStore, sanitize_key};
