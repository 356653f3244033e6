//! Web search through SerpAPI's Google engine.

pub mod client;
mod extract;
pub mod types;

pub use client::{SearchClient, SearchError, SerpClient};
pub use types::{OrganicHit, SearchOutcome};
