#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ListingError>;

impl ListingError {
    /// True for credential rejections, as opposed to transport or source
    /// failures.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ListingError::AuthenticationFailed(_))
    }
}
