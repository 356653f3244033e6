use tracing::debug;

use super::client::SearchError;
use super::types::{OrganicHit, OrganicResult, SearchOutcome, SearchResponse};

/// Placeholder for organic result fields the provider omitted.
const MISSING_FIELD: &str = "N/A";

/// SerpAPI reports an empty result page through `error` rather than an empty array.
const EMPTY_RESULTS_MARKER: &str = "hasn't returned any results";

pub fn extract_outcome(response: SearchResponse) -> Result<SearchOutcome, SearchError> {
    match (response.organic_results, response.error) {
        (Some(results), _) if !results.is_empty() => {
            Ok(SearchOutcome::Hits(results.into_iter().map(to_hit).collect()))
        }
        (_, Some(message)) if !message.contains(EMPTY_RESULTS_MARKER) => {
            Err(SearchError::Provider(message))
        }
        (_, message) => {
            debug!(message = message.as_deref().unwrap_or(""), "no organic results");
            Ok(SearchOutcome::NoResults)
        }
    }
}

fn to_hit(result: OrganicResult) -> OrganicHit {
    let or_missing = |field: Option<String>| field.unwrap_or_else(|| MISSING_FIELD.to_string());
    OrganicHit {
        link: or_missing(result.link),
        title: or_missing(result.title),
        snippet: or_missing(result.snippet),
    }
}
