//! Unified error type for the reporting API, loader, and bootstrap.

use thiserror::Error;

/// All failure modes the crate surfaces.
///
/// `MissingDateRange` and `InvalidDate` are client-visible validation errors;
/// everything else is logged and masked as an opaque internal failure at the
/// HTTP boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A report was requested without both range bounds.
    #[error("Start date and end date are required.")]
    MissingDateRange,

    /// A range bound was present but not a `YYYY-MM-DD` date.
    #[error("Invalid date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV field failed numeric or temporal parsing; the load aborts.
    #[error("Malformed `{field}` value `{value}`")]
    MalformedField { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
