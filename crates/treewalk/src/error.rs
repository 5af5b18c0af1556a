use std::fmt;

/// Unified error type for the treewalk crate.
#[derive(Debug, Clone)]
pub enum CrawlError {
    /// The directory source failed or denied access during a crawl step; the
    /// messages are surfaced verbatim to the client.
    Source(Vec<String>),
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlError::Source(messages) => write!(f, "source error: {}", messages.join("; ")),
            CrawlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CrawlError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CrawlError {}

/// Result type alias using [`CrawlError`].
pub type CrawlResult<T> = Result<T, CrawlError>;
