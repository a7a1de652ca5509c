//! Error types for the fingerprint core.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing references, fingerprints or snapshots.
#[derive(Error, Debug)]
pub enum Error {
    /// A node reference string is not of the form `storeType://storeId/nodeId`.
    #[error("invalid node reference '{value}': {reason}")]
    InvalidNodeRef {
        /// The rejected input.
        value: String,
        /// Description of what's wrong.
        reason: &'static str,
    },

    /// A stored fingerprint is not of the form `property|digestType|digestValue`.
    #[error("failed to parse content fingerprint {0}")]
    InvalidFingerprint(String),

    /// The requested message digest is not supported.
    #[error("digest type is not available: {0}")]
    UnknownDigestType(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
