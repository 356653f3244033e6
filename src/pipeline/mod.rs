//! Scrape, train and query flows over the result store.
//!
//! Each flow walks its entities sequentially. Per-entity failures become report entries;
//! only validation, store and (for training) inference errors abort a flow.

pub mod remote;
pub mod scrape;

pub use remote::{QueryRequest, TrainOutcome, format_query_report, query, train};
pub use scrape::{ScrapeRequest, format_summary, scrape};

use crate::inference::InferenceError;
use crate::store::StoreError;
use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Inference(#[from] InferenceError),
}
