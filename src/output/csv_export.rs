use std::io::Write;
use std::path::Path;

use super::OutputError;
use crate::store::{NewRow, SearchResultRow};

pub const EXPORT_HEADER: [&str; 4] = ["Entity", "URL", "Title", "Snippet"];
const STORED_HEADER: [&str; 5] = ["ID", "Entity", "URL", "Title", "Snippet"];

/// Write the scrape export (`Entity,URL,Title,Snippet`) to any sink.
pub fn write_export<W: Write>(sink: W, rows: &[NewRow]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        writer.write_record([&row.entity, &row.url, &row.title, &row.snippet])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_to_path(path: &Path, rows: &[NewRow]) -> Result<(), OutputError> {
    let file = std::fs::File::create(path).map_err(|source| OutputError::Create {
        path: path.display().to_string(),
        source,
    })?;
    write_export(file, rows)
}

pub fn export_string(rows: &[NewRow]) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    write_export(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Stored rows including their ids, for `view --format csv`.
pub fn stored_string(rows: &[SearchResultRow]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(STORED_HEADER)?;
    for row in rows {
        writer.write_record([
            row.id.to_string().as_str(),
            row.entity.as_str(),
            row.url.as_str(),
            row.title.as_str(),
            row.snippet.as_str(),
        ])?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| OutputError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
