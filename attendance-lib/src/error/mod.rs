//! Error types

mod api;
mod date;
mod export;

pub use api::*;
pub use date::*;
pub use export::*;

/// Top-level error for fallible library operations.
///
/// The explorer itself never fails; errors come from the backend client,
/// date validation and export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Date range rejected before any request was made.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}
