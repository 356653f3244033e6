//! Client for the remote language-model endpoint (bulk train, per-entity query).

pub mod client;
pub mod types;

pub use client::{DEFAULT_ENDPOINT, InferenceBackend, InferenceClient, InferenceError};
pub use types::TrainingRecord;
