use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::FlatEntry;
use crate::error::ListingError;
use crate::path::DirectoryPath;

/// Opaque credentials passed through to a source. Whether any of the fields
/// are required is a property of the source, not of this type.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub api_key: String,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.login.is_empty() && self.password.is_empty() && self.api_key.is_empty()
    }
}

// Secrets stay out of log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// One directory-listing capability.
///
/// A source lists exactly one directory per call, non-recursively. Sources
/// are independent capabilities selected by name from the registry; the
/// crawl engine depends only on this interface.
#[async_trait::async_trait]
pub trait DirectorySource: Send + Sync {
    /// Stable identifier used to select the source per request.
    fn name(&self) -> &str;

    /// Human-readable label, also used as a friendlier root title.
    fn label(&self) -> &str;

    fn requires_login(&self) -> bool {
        false
    }

    fn requires_api_key(&self) -> bool {
        false
    }

    /// Validate credentials for the given directory before any fetch.
    async fn check_credentials(
        &self,
        _directory: &DirectoryPath,
        _credentials: &Credentials,
    ) -> Result<(), ListingError> {
        Ok(())
    }

    /// List the children of one directory. On failure every error the source
    /// collected is returned so the client sees the full picture.
    async fn list(
        &self,
        directory: &DirectoryPath,
        credentials: &Credentials,
    ) -> Result<FlatEntry, Vec<ListingError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = Credentials {
            login: "user".to_string(),
            password: "hunter2".to_string(),
            api_key: "key-123".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("key-123"));
    }
}
