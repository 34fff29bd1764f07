//! Error types for feed reading and writing.

use thiserror::Error;

/// Result type for every reader, writer, parser and formatter operation.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while reading or writing a feed.
///
/// Every variant is fatal to the call that produced it. Nothing is retried
/// internally and a failed read leaves the cursor at an unspecified position
/// inside the element that failed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The caller passed an empty or structurally invalid value.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The consumed text or content tree does not have the expected shape.
    #[error("Invalid format: {0}")]
    Format(String),

    /// The requested typed read does not match the reader's current element.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The XML tokenizer or writer failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error from the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        FeedError::Argument(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        FeedError::Format(msg.into())
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        FeedError::Xml(err.to_string())
    }
}
