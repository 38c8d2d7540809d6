use thiserror::Error;

/// Global error type for the insight serialization contract.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The record cannot be encoded, e.g. its instrument identity is missing.
    #[error("invalid insight record: {0}")]
    InvalidRecord(String),

    /// A document field failed to decode into its canonical type.
    #[error("malformed insight document: {0}")]
    MalformedDocument(String),

    /// A document carries both a canonical key and its deprecated alias.
    #[error("document carries both '{canonical}' and deprecated '{legacy}'")]
    AmbiguousLegacyField { canonical: String, legacy: String },

    /// The surrounding JSON could not be read or written at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;
