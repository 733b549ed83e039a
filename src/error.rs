//! Error types for the layout library.
//!
//! Most layout failures are page-local and are reported through
//! [`DocumentReport`](crate::pipeline::DocumentReport) instead of aborting a
//! document. The variants here cover what callers can still observe: a page
//! that fails validation, a bad configuration, and I/O around the binary.

/// Result type alias for layout library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// Page carries no text-bearing rows
    #[error("Empty page: {0}")]
    EmptyPage(String),

    /// A row on the page has unusable geometry or fields
    #[error("Invalid token on page {page} at row {index}: {reason}")]
    InvalidToken {
        /// Page identifier
        page: String,
        /// Row index within the page
        index: usize,
        /// Reason the row was rejected
        reason: String,
    },

    /// Threshold configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown journal or scan mode name
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
