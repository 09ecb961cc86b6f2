//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AttrSync
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AttrSyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Report error: {0}")]
    Report(String),

    /// A folder listing failed. Absorbed by the tree walker.
    #[error("Traversal error: {0}")]
    Traversal(String),

    /// The current version of a file could not be resolved.
    #[error("Version resolution failed: {0}")]
    VersionResolution(String),

    /// The remote attribute update was rejected.
    #[error("Update failed: {0}")]
    Update(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttrSyncError {
    /// Stable label suitable for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Dataset(_) => "dataset",
            Self::Report(_) => "report",
            Self::Traversal(_) => "traversal",
            Self::VersionResolution(_) => "version_resolution",
            Self::Update(_) => "update",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for AttrSync operations
pub type Result<T> = std::result::Result<T, AttrSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_prefix() {
        let err = AttrSyncError::Update("Status 403".into());
        assert_eq!(err.to_string(), "Update failed: Status 403");
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let err = AttrSyncError::Traversal("folder gone".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"Traversal","message":"folder gone"}"#);
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(AttrSyncError::VersionResolution(String::new()).label(), "version_resolution");
        assert_eq!(AttrSyncError::NotFound(String::new()).label(), "not_found");
    }
}
