//! CSV export of explorer rows.
//!
//! Every value is quoted, embedded quotes are doubled and records end with a
//! bare `\n`. Absent and null values export as empty strings. An export with
//! no rows is an error rather than a header-only document.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::QuoteStyle;
use csv::Terminator;
use csv::WriterBuilder;

use crate::error::ExportError;
use crate::model::FieldPath;
use crate::model::Row;
use crate::model::resolve_present;

/// One exported column: header text and the field it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportField {
    /// Header written in the first record.
    pub header: String,
    /// Field (or dotted path) read from each row.
    pub key: FieldPath,
}

impl ExportField {
    /// Creates an export field.
    pub fn new(header: impl Into<String>, key: impl Into<FieldPath>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
        }
    }

    /// Uses the field key as its own header.
    pub fn keyed(key: impl Into<FieldPath>) -> Self {
        let key = key.into();
        Self {
            header: key.to_string(),
            key,
        }
    }
}

/// Writes `rows` as CSV to `writer`, returning the number of data records.
pub fn write_csv<W: io::Write>(
    writer: W,
    rows: &[&Row],
    fields: &[ExportField],
) -> Result<usize, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(fields.iter().map(|f| f.header.as_str()))?;
    for row in rows {
        wtr.write_record(fields.iter().map(|f| cell(row, &f.key)))?;
    }
    wtr.flush()?;

    log::debug!("exported {} rows x {} fields", rows.len(), fields.len());
    Ok(rows.len())
}

/// Builds the CSV document in memory.
pub fn to_csv_string(rows: &[&Row], fields: &[ExportField]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows, fields)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the CSV document to a file at `path`.
///
/// Nothing is created when there are no rows.
pub fn write_csv_file(
    path: impl AsRef<Path>,
    rows: &[&Row],
    fields: &[ExportField],
) -> Result<usize, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let file = File::create(path.as_ref())?;
    let count = write_csv(file, rows, fields)?;
    log::info!("wrote {} rows to {}", count, path.as_ref().display());
    Ok(count)
}

/// Download filename for an export: `{prefix}_{from}_{to}.csv`.
///
/// Slashes in the dates become dashes, so `01/05/2024` names a file rather
/// than a directory. Missing dates are left out.
pub fn export_filename(prefix: &str, from: Option<&str>, to: Option<&str>) -> String {
    let mut name = prefix.to_string();
    for date in [from, to].into_iter().flatten() {
        let date = date.trim();
        if !date.is_empty() {
            name.push('_');
            name.push_str(&date.replace('/', "-"));
        }
    }
    name.push_str(".csv");
    name
}

fn cell(row: &Row, key: &FieldPath) -> String {
    resolve_present(row, key)
        .map(ToString::to_string)
        .unwrap_or_default()
}
