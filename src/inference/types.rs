use serde::Serialize;

use crate::store::SearchResultRow;

/// Flattened stored result submitted for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingRecord {
    pub entity: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl From<SearchResultRow> for TrainingRecord {
    fn from(row: SearchResultRow) -> Self {
        Self {
            entity: row.entity,
            url: row.url,
            title: row.title,
            snippet: row.snippet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrainRequest<'a> {
    pub data: &'a [TrainingRecord],
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}
