use serde::Serialize;

/// A stored search hit. Rows are append-only; `id` comes from SQLite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultRow {
    pub id: i64,
    pub entity: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// A hit collected during a scrape, not yet written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRow {
    pub entity: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
}

#[cfg(test)]
impl SearchResultRow {
    pub fn without_id(&self) -> NewRow {
        NewRow {
            entity: self.entity.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            snippet: self.snippet.clone(),
        }
    }
}
