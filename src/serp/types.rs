use serde::Deserialize;

/// Subset of the SerpAPI Google engine response used here.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub organic_results: Option<Vec<OrganicResult>>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    pub link: Option<String>,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganicHit {
    pub link: String,
    pub title: String,
    pub snippet: String,
}

/// A successful provider call either yields hits or explicitly none.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Hits(Vec<OrganicHit>),
    NoResults,
}
