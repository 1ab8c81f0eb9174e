//! Export of search results to CSV or JSON files.

use crate::model::{ExportError, TenantMatch};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Columns written to CSV, in order.
pub const CSV_COLUMNS: [&str; 5] = ["display_name", "identifier", "contact", "status", "plan"];

/// Leading byte order mark; spreadsheet tools need it to read the file as UTF-8.
pub const CSV_BOM: char = '\u{feff}';

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array in the API's field names.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Quote a CSV field: always wrapped in double quotes, inner quotes doubled.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render records as CSV, BOM first. Missing optional fields become empty cells.
pub fn to_csv(records: &[TenantMatch]) -> String {
    let mut out = String::from(CSV_BOM);
    out.push_str(
        &CSV_COLUMNS
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');

    for record in records {
        let row = [
            record.display_name.as_str(),
            record.identifier.as_str(),
            record.contact.as_deref().unwrap_or(""),
            record.status.as_deref().unwrap_or(""),
            record.plan.as_deref().unwrap_or(""),
        ];
        out.push_str(&row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    out
}

/// Render records as a pretty JSON array.
pub fn to_json(records: &[TenantMatch]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// `<stem>_<YYYY-MM-DD>.<ext>`, the naming used by the admin export buttons.
pub fn default_file_name(stem: &str, format: ExportFormat, at: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "{stem}_{}.{}",
        at.format("%Y-%m-%d"),
        format.extension()
    ))
}

/// Write `records` to `path`. Returns the number of records written.
///
/// # Errors
///
/// - `ExportError::Empty` when there is nothing to export
/// - `ExportError::Write` when the file cannot be written
pub fn export_to(path: &Path, format: ExportFormat, records: &[TenantMatch]) -> Result<usize, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let contents = match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Json => to_json(records)?,
    };
    std::fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), ?format, "export written");
    Ok(records.len())
}
