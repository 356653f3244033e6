use crate::input::InputError;
use crate::output::OutputError;
use crate::pipeline::PipelineError;
use crate::serp::SearchError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0} (scraping is disabled until a key is configured)")]
    SearchUnavailable(SearchError),

    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Output(#[from] OutputError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
