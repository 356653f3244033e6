//! SQLite-backed result store (libSQL, local file or `:memory:`).

pub mod types;

use libsql::Builder;
use tracing::debug;

pub use types::{NewRow, SearchResultRow};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS search_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entity TEXT,
    url TEXT,
    title TEXT,
    snippet TEXT
)";

const INSERT_ROW: &str =
    "INSERT INTO search_results (entity, url, title, snippet) VALUES (?1, ?2, ?3, ?4) RETURNING id";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error("query returned no row")]
    NoRow,
}

/// Owned handle to the results database. Created once per invocation and passed by
/// reference to the actions that read or write it.
pub struct ResultStore {
    _db: libsql::Database,
    conn: libsql::Connection,
}

impl ResultStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let store = Self { _db: db, conn };
        store.init().await?;
        debug!(path, "result store ready");
        Ok(store)
    }

    /// Idempotent; never drops or alters existing data.
    pub async fn init(&self) -> Result<(), StoreError> {
        self.conn.execute(CREATE_TABLE, ()).await?;
        Ok(())
    }

    /// Single-row append. Scrapes go through `insert_all`.
    #[allow(dead_code)]
    pub async fn insert(&self, row: &NewRow) -> Result<i64, StoreError> {
        insert_on(&self.conn, row).await
    }

    /// Insert all rows in one transaction, returning their ids in input order.
    pub async fn insert_all(&self, rows: &[NewRow]) -> Result<Vec<i64>, StoreError> {
        let tx = self.conn.transaction().await?;
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(insert_on(&tx, row).await?);
        }
        tx.commit().await?;
        debug!(rows = ids.len(), "rows committed");
        Ok(ids)
    }

    pub async fn scan_all(&self) -> Result<Vec<SearchResultRow>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, entity, url, title, snippet FROM search_results ORDER BY id",
                (),
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(SearchResultRow {
                id: row.get::<i64>(0)?,
                entity: text_column(&row, 1)?,
                url: text_column(&row, 2)?,
                title: text_column(&row, 3)?,
                snippet: text_column(&row, 4)?,
            });
        }
        Ok(out)
    }

    /// Distinct entity values, in order of first appearance.
    pub async fn scan_distinct_entities(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT entity FROM search_results GROUP BY entity ORDER BY MIN(id)",
                (),
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(text_column(&row, 0)?);
        }
        Ok(out)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM search_results", ())
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoRow)?;
        Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
    }
}

async fn insert_on(conn: &libsql::Connection, row: &NewRow) -> Result<i64, StoreError> {
    let mut rows = conn
        .query(
            INSERT_ROW,
            libsql::params![
                row.entity.as_str(),
                row.url.as_str(),
                row.title.as_str(),
                row.snippet.as_str()
            ],
        )
        .await?;
    let inserted = rows.next().await?.ok_or(StoreError::NoRow)?;
    Ok(inserted.get::<i64>(0)?)
}

/// Columns are nullable in the schema; NULL reads back as an empty string.
fn text_column(row: &libsql::Row, idx: i32) -> Result<String, StoreError> {
    Ok(row.get::<Option<String>>(idx)?.unwrap_or_default())
}
