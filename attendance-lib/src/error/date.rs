//! Date range error types

/// Errors produced when validating a `DD/MM/YYYY` date range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// One or both bounds are blank.
    #[error("Please select both from and to dates")]
    Missing,

    /// A bound is not a valid `DD/MM/YYYY` date.
    #[error("Invalid {field} date '{value}', expected DD/MM/YYYY")]
    Invalid {
        /// Which bound failed (`from` or `to`).
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}
