use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{QueryRequest, TrainRequest, TrainingRecord};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/generate";

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference API error: {status}, {body}")]
    Status { status: u16, body: String },

    #[error("failed to connect to inference API: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("inference API returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Remote train/query endpoint. Implemented by `InferenceClient`; tests use in-memory fakes.
pub trait InferenceBackend {
    async fn train(&self, records: &[TrainingRecord]) -> Result<(), InferenceError>;
    async fn query(&self, text: &str) -> Result<Vec<Value>, InferenceError>;
}

#[derive(Clone, Debug)]
pub struct InferenceClient {
    http: Client,
    endpoint: String,
}

impl InferenceClient {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `body` and return the response once it is known to be a 200.
    async fn post<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<reqwest::Response, InferenceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("User-Agent", crate::USER_AGENT)
            .json(body)
            .send()
            .await
            .map_err(InferenceError::Connectivity)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "inference API error");
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl InferenceBackend for InferenceClient {
    async fn train(&self, records: &[TrainingRecord]) -> Result<(), InferenceError> {
        self.post(&TrainRequest { data: records }).await?;
        debug!(records = records.len(), "training submitted");
        Ok(())
    }

    async fn query(&self, text: &str) -> Result<Vec<Value>, InferenceError> {
        let response = self.post(&QueryRequest { query: text }).await?;
        let body: Value = response.json().await.map_err(InferenceError::Decode)?;
        Ok(flatten_results(body))
    }
}

/// An array contributes its elements; any other JSON value counts as one result.
fn flatten_results(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
