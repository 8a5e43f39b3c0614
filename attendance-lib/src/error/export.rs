//! Export error types

/// Errors that can occur while exporting the explorer's rows.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The filtered collection is empty; no document is produced.
    #[error("No data to export")]
    Empty,

    /// The CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the document to its sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Returns `true` if the export failed only because there was nothing to export.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
