//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: Profile, role and language types
//! - `repository`: Repository trait for profile persistence

mod model;
mod repository;

pub use model::{Language, Profile, UserRole};
pub use repository::ProfileRepository;
