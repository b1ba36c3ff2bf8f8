//! Error types for kinesense

use thiserror::Error;

/// Errors that can occur while constructing or driving the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid observation record: {0}")]
    InvalidRecord(#[from] crate::schema::ValidationError),

    #[error("Failed to parse record: {0}")]
    ParseError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
