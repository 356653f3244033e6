//! Entity lists read from one column of a CSV file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' not found; available columns: {}", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("CSV has no header row")]
    NoColumns,
}

/// Which column holds entity names.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSelector<'a> {
    Named(&'a str),
    First,
}

pub fn read_entities_from_path(
    path: &Path,
    column: ColumnSelector<'_>,
) -> Result<Vec<String>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_entities(file, column)
}

pub fn read_columns_from_path(path: &Path) -> Result<Vec<String>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    Ok(reader.headers()?.iter().map(String::from).collect())
}

/// Values of the selected column, in file order. Blank cells are skipped;
/// duplicates are kept.
pub fn read_entities<R: Read>(
    source: R,
    column: ColumnSelector<'_>,
) -> Result<Vec<String>, InputError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let index = match column {
        ColumnSelector::First if headers.is_empty() => return Err(InputError::NoColumns),
        ColumnSelector::First => 0,
        ColumnSelector::Named(name) => headers
            .iter()
            .position(|h| h.trim() == name.trim())
            .ok_or_else(|| InputError::MissingColumn {
                column: name.to_string(),
                available: headers.clone(),
            })?,
    };

    let mut entities = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match record.get(index).map(str::trim) {
            Some(value) if !value.is_empty() => entities.push(value.to_string()),
            _ => warn!(row = line + 1, column = %headers[index], "skipping blank entity"),
        }
    }

    debug!(column = %headers[index], entities = entities.len(), "entities loaded");
    Ok(entities)
}
