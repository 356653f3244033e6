//! Rendering of stored and pending rows: Markdown table, JSON, or CSV.

pub mod csv_export;
mod markdown;

use clap::ValueEnum;

use crate::store::{NewRow, SearchResultRow};
use markdown::{escape_table_cell, truncate_chars};

const MAX_SNIPPET_CHARS: usize = 120;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot create {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn render_stored(rows: &[SearchResultRow], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => Ok(stored_table(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => csv_export::stored_string(rows),
    }
}

pub fn render_pending(rows: &[NewRow], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => Ok(pending_table(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => csv_export::export_string(rows),
    }
}

fn stored_table(rows: &[SearchResultRow]) -> String {
    let mut out = String::from("| ID | Entity | URL | Title | Snippet |\n|----|--------|-----|-------|---------|\n");
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.id,
            escape_table_cell(&row.entity),
            escape_table_cell(&row.url),
            escape_table_cell(&row.title),
            escape_table_cell(&truncate_chars(&row.snippet, MAX_SNIPPET_CHARS)),
        ));
    }
    out
}

fn pending_table(rows: &[NewRow]) -> String {
    let mut out = String::from("| Entity | URL | Title | Snippet |\n|--------|-----|-------|---------|\n");
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_table_cell(&row.entity),
            escape_table_cell(&row.url),
            escape_table_cell(&row.title),
            escape_table_cell(&truncate_chars(&row.snippet, MAX_SNIPPET_CHARS)),
        ));
    }
    out
}
