//! Conversions from external infrastructure errors into domain errors.

use attrsync_domain::AttrSyncError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AttrSyncError);

impl From<InfraError> for AttrSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AttrSyncError> for InfraError {
    fn from(value: AttrSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAttrSyncError {
    fn into_attrsync(self) -> AttrSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AttrSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAttrSyncError for HttpError {
    fn into_attrsync(self) -> AttrSyncError {
        if self.is_timeout() {
            return AttrSyncError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return AttrSyncError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return AttrSyncError::Network(format!("HTTP response body could not be decoded: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => AttrSyncError::Auth(message),
                404 => AttrSyncError::NotFound(message),
                429 => AttrSyncError::Network(message),
                400..=499 => AttrSyncError::InvalidInput(message),
                _ => AttrSyncError::Network(message),
            };
        }

        AttrSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_attrsync())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AttrSyncError */
/* -------------------------------------------------------------------------- */

impl IntoAttrSyncError for serde_json::Error {
    fn into_attrsync(self) -> AttrSyncError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => AttrSyncError::Internal(format!("JSON I/O failure: {self}")),
            Category::Syntax | Category::Eof => {
                AttrSyncError::InvalidInput(format!("malformed JSON: {self}"))
            }
            Category::Data => AttrSyncError::InvalidInput(format!("unexpected JSON shape: {self}")),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_attrsync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
