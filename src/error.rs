//! Error types for lsdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LsdbError
pub type Result<T> = std::result::Result<T, LsdbError>;

/// Unified error type for lsdb operations
#[derive(Debug, Error)]
pub enum LsdbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A segment listed in the catalog could not be read back
    #[error("Segment {id} unavailable: {source}")]
    SegmentUnavailable {
        id: u64,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("Segment catalog corrupt at line {line}: {content:?} is not a segment id")]
    CatalogCorrupt { line: usize, content: String },

    /// The id space is used up; no further segment can be committed
    #[error("Segment ids exhausted: no id follows {last}")]
    SegmentIdsExhausted { last: u64 },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record at offset {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
