//! Error types for catalog loading and lookup.

use thiserror::Error;

/// Errors raised on malformed catalog payloads or structurally invalid
/// records.
///
/// A catalog with zero records is valid and never an error: callers
/// distinguish "no data" from "unparseable data".
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Gzip payload could not be decompressed.
    #[error("Gzip decompression failed: {0}")]
    Gzip(#[from] std::io::Error),

    /// JSON payload could not be parsed as an instrument list.
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV payload could not be parsed.
    #[error("Invalid CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    /// CSV header is missing a required column.
    #[error("CSV catalog missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A record that should carry a field does not.
    #[error("Instrument '{key}' is missing required field '{field}'")]
    MissingField {
        /// Trading identifier of the offending record.
        key: String,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A date field could not be parsed.
    #[error("Invalid date '{value}' in catalog: {source}")]
    InvalidDate {
        /// The unparseable value.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },
}
