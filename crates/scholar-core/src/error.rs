//! Unified error types for Scholar

use thiserror::Error;

/// Unified error type for all Scholar operations
///
/// This is a closed taxonomy: validation and resource errors are caught at
/// the operation boundary and turned into structured tool results; only the
/// remaining variants ever cross a server boundary.
#[derive(Error, Debug)]
pub enum ScholarError {
    /// Tool arguments failed schema validation (one message per violation)
    #[error("input validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A required external resource (file, interpreter, downstream server)
    /// could not be reached
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A downstream call or script exceeded its wall-clock deadline
    #[error("call to {name} timed out after {seconds}s")]
    CallTimeout { name: String, seconds: u64 },

    /// Request named an operation the server does not provide (fatal)
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Malformed request or response on the wire
    #[error("protocol error: {0}")]
    Protocol(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using ScholarError
pub type Result<T> = std::result::Result<T, ScholarError>;
