mod errors;
mod params;

pub use errors::CommandError;
pub use params::{ColumnsParams, QueryParams, ScrapeParams, TrainParams, ViewParams};

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::inference::InferenceClient;
use crate::input::{self, ColumnSelector};
use crate::output::{self, csv_export};
use crate::pipeline::{self, QueryRequest, ScrapeRequest, TrainOutcome};
use crate::serp::{SearchError, SerpClient};
use crate::store::ResultStore;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request timeout covering connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<Client, CommandError> {
    Ok(Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?)
}

/// Column names of a CSV file. Needs neither the store nor the network.
pub fn columns(params: ColumnsParams) -> Result<String, CommandError> {
    let columns = input::read_columns_from_path(&params.input)?;
    Ok(columns.iter().map(|c| format!("{c}\n")).collect())
}

/// Runs the user-facing actions against one owned store handle.
///
/// Configuration via environment variables:
/// - `SERPAPI_KEY`: enables `scrape` (required for it, no fallback)
/// - `SERPAPI_BASE_URL`: alternative search API base URL (optional)
pub struct Retriever {
    store: ResultStore,
    serp: Option<SerpClient>,
    inference: InferenceClient,
}

impl Retriever {
    pub fn new(http: Client, store: ResultStore, endpoint: &str) -> Self {
        let serp = SerpClient::from_env(http.clone())
            .inspect_err(|e| debug!("search client not available: {e}"))
            .ok();
        Self::with_clients(store, serp, InferenceClient::new(http, endpoint))
    }

    pub fn with_clients(
        store: ResultStore,
        serp: Option<SerpClient>,
        inference: InferenceClient,
    ) -> Self {
        Self {
            store,
            serp,
            inference,
        }
    }

    fn serp(&self) -> Result<&SerpClient, CommandError> {
        self.serp
            .as_ref()
            .ok_or(CommandError::SearchUnavailable(SearchError::ApiKeyNotSet))
    }

    pub async fn scrape(&self, params: ScrapeParams) -> Result<String, CommandError> {
        let serp = self.serp()?;

        let selector = params
            .column
            .as_deref()
            .map_or(ColumnSelector::First, ColumnSelector::Named);
        let entities = input::read_entities_from_path(&params.input, selector)?;

        info!(input = %params.input.display(), entities = entities.len(), "cmd:scrape");

        let report = pipeline::scrape(
            serp,
            &self.store,
            &ScrapeRequest {
                entities: &entities,
                template: &params.template,
                policy: params.placeholder_policy,
            },
        )
        .await?;

        let mut out = pipeline::format_summary(&report);
        info!(stored = self.store.count().await?, "cmd:scrape done");

        if report.rows.is_empty() {
            return Ok(out);
        }

        out.push_str("\n## Scraped Results\n\n");
        out.push_str(&output::render_pending(&report.rows, params.format)?);

        if let Some(path) = &params.export {
            csv_export::export_to_path(path, &report.rows)?;
            info!(path = %path.display(), rows = report.rows.len(), "results exported");
            out.push_str(&format!("\nResults exported to {}\n", path.display()));
        }

        Ok(out)
    }

    pub async fn view(&self, params: ViewParams) -> Result<String, CommandError> {
        let rows = self.store.scan_all().await?;
        info!(rows = rows.len(), "cmd:view");

        if rows.is_empty() {
            return Ok("No data found in the database.\n".to_string());
        }
        Ok(output::render_stored(&rows, params.format)?)
    }

    pub async fn train(&self, params: TrainParams) -> Result<String, CommandError> {
        info!(endpoint = %self.inference.endpoint(), "cmd:train");

        match pipeline::train(&self.inference, &self.store).await? {
            TrainOutcome::NoData => Ok(
                "No data available for training. Please scrape or upload data first.\n"
                    .to_string(),
            ),
            TrainOutcome::Trained { records } => {
                let mut out = String::new();
                if params.show_data {
                    out.push_str("## Training Data\n\n");
                    out.push_str(&serde_json::to_string_pretty(&records)?);
                    out.push_str("\n\n");
                }
                out.push_str(&format!(
                    "Training completed successfully ({} records).\n",
                    records.len()
                ));
                Ok(out)
            }
        }
    }

    pub async fn query(&self, params: QueryParams) -> Result<String, CommandError> {
        info!(template = %params.template, endpoint = %self.inference.endpoint(), "cmd:query");

        let report = pipeline::query(
            &self.inference,
            &self.store,
            &QueryRequest {
                template: &params.template,
                policy: params.placeholder_policy,
            },
        )
        .await?;

        info!(
            entities = report.outcomes.len(),
            results = report.results.len(),
            "query complete"
        );
        Ok(pipeline::format_query_report(&report)?)
    }
}
