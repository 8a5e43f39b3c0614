//! CLI error type

use attendance_lib::error::ApiError;
use attendance_lib::error::DateRangeError;
use attendance_lib::error::ExportError;

/// Anything that ends a CLI run with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Bad `--from`/`--to`.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Export failed, including "nothing to export".
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is not JSON, or output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
