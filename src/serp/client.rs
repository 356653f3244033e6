use std::env;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::extract::extract_outcome;
use super::types::{SearchOutcome, SearchResponse};

const API_BASE: &str = "https://serpapi.com";
const ENGINE: &str = "google";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("SERPAPI_KEY not set. Get one at https://serpapi.com/manage-api-key")]
    ApiKeyNotSet,

    #[error("search API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("search provider error: {0}")]
    Provider(String),

    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search API returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// One web search per call. Implemented by `SerpClient`; tests substitute canned responses.
pub trait SearchClient {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone, Debug)]
pub struct SerpClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl SerpClient {
    /// Reads `SERPAPI_KEY` (required, no fallback) and the optional `SERPAPI_BASE_URL`.
    pub fn from_env(http: Client) -> Result<Self, SearchError> {
        let api_key = env::var("SERPAPI_KEY").map_err(|_| SearchError::ApiKeyNotSet)?;
        let base_url = env::var("SERPAPI_BASE_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| API_BASE.to_string());
        Self::new(http, &api_key, &base_url)
    }

    pub fn new(http: Client, api_key: &str, base_url: &str) -> Result<Self, SearchError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(SearchError::ApiKeyNotSet);
        }
        if !base_url.starts_with("https://") {
            warn!(base_url, "search API key will be sent over plain HTTP");
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.to_string()),
            base_url: base_url.to_string(),
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        let url = Url::parse_with_params(
            &format!("{}/search.json", self.base_url),
            [
                ("engine", ENGINE),
                ("q", query),
                ("api_key", self.api_key.0.as_str()),
            ],
        )?;
        Ok(url)
    }
}

impl SearchClient for SerpClient {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let url = self.search_url(query)?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&text);
            warn!(status = %status, "search API error");
            return Err(SearchError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await.map_err(SearchError::Decode)?;
        debug!(query, "search complete");
        extract_outcome(body)
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or_else(|| body.chars().take(200).collect())
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::serp::types::OrganicHit;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SerpClient {
        SerpClient::new(Client::new(), "test-key", &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn search_success_returns_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("engine", "google"))
            .and(query_param("q", "Find contact details for Acme Corp."))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search_metadata": {"status": "Success"},
                "organic_results": [
                    {"position": 1, "link": "https://acme.com", "title": "Acme", "snippet": "Acme Corp home"},
                    {"position": 2, "link": "https://acme.com/contact", "title": "Contact"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client(&server)
            .search("Find contact details for Acme Corp.")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Hits(vec![
                OrganicHit {
                    link: "https://acme.com".into(),
                    title: "Acme".into(),
                    snippet: "Acme Corp home".into(),
                },
                OrganicHit {
                    link: "https://acme.com/contact".into(),
                    title: "Contact".into(),
                    snippet: "N/A".into(),
                },
            ])
        );
    }

    #[tokio::test]
    async fn search_without_organic_results_is_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search_metadata": {"status": "Success"},
                "error": "Google hasn't returned any results for this query."
            })))
            .mount(&server)
            .await;

        let outcome = client(&server).search("obscure").await.unwrap();
        assert_eq!(outcome, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn search_401_returns_api_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Invalid API key."})),
            )
            .mount(&server)
            .await;

        let result = client(&server).search("test").await;
        match result {
            Err(SearchError::Api { code: 401, message }) => {
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("expected Api(401), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_invalid_json_returns_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).search("test").await;
        match result {
            Err(e @ SearchError::Decode(_)) => {
                assert!(e.to_string().starts_with("search API returned an unreadable body"));
            }
            other => panic!("expected Decode, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let client = SerpClient::new(Client::new(), "test-key", "http://127.0.0.1:1").unwrap();
        let result = client.search("test").await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }
}
