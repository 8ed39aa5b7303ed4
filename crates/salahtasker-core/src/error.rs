//! Core error types for salahtasker-core.
//!
//! The resolution pipeline reports failures through an exhaustive tagged
//! taxonomy so callers can pattern-match instead of downcasting: a missing
//! location is user-correctable, upstream failures are not, and storage
//! failures never surface past the resolver.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for salahtasker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// City or country could not be determined from the request or the
    /// caller's saved defaults. Maps to HTTP 400 at the web boundary.
    #[error("city and country are required; pass them explicitly or save defaults in settings")]
    MissingLocation,

    /// The remote prayer-time service could not be reached, or answered
    /// with a non-success HTTP status. Transient; retryable by the caller.
    /// Maps to HTTP 500 at the web boundary.
    #[error("prayer time service unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered, but the body was not the expected
    /// shape (unparseable JSON, `code != 200`, or missing timings).
    /// Not retryable without an upstream fix. Maps to HTTP 500.
    #[error("unexpected response from prayer time service: {0}")]
    UpstreamMalformed(String),

    /// Local storage errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CoreError {
    /// Whether retrying the same request later could succeed without any
    /// change on the caller's side.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::UpstreamUnavailable { .. })
    }

    /// HTTP status the out-of-scope web tier should map this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::MissingLocation => 400,
            _ => 500,
        }
    }
}

/// SQLite storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Row lookup found nothing for the given id/owner pair
    #[error("Record not found")]
    NotFound,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_location_is_a_client_error() {
        assert_eq!(CoreError::MissingLocation.http_status(), 400);
        assert!(!CoreError::MissingLocation.is_retryable());
    }

    #[test]
    fn upstream_unavailable_is_retryable() {
        let err = CoreError::UpstreamUnavailable {
            message: "HTTP 503".into(),
            source: None,
        };
        assert_eq!(err.http_status(), 500);
        assert!(err.is_retryable());
    }

    #[test]
    fn malformed_is_not_retryable() {
        let err = CoreError::UpstreamMalformed("code 404".into());
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_retryable());
    }
}
