//! Application layer: the responder use case and its wiring.

pub mod bootstrap;
pub mod responder_usecase;

pub use bootstrap::{AppBootstrap, bootstrap, build_usecase};
pub use responder_usecase::{GenerationResult, ResponderUseCase, Snapshot};
