//! Error types for Cover Arts
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The four fetch-facing variants (`InvalidQuery`, `Unauthorized`,
//! `SourceUnavailable`, `MalformedResponse`) are what a consumer of the
//! paged fetcher has to handle. Only `SourceUnavailable` is retryable, and
//! retrying is always the caller's decision.

use thiserror::Error;

/// The main error type for Cover Arts
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Invalid cursor '{cursor}': {message}")]
    InvalidCursor { cursor: String, message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Source unavailable: {message}")]
    SourceUnavailable {
        message: String,
        /// Seconds the source asked us to wait (HTTP 429 Retry-After)
        retry_after_seconds: Option<u64>,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Collection Errors
    // ============================================================================
    #[error("Collection '{collection_id}' not found for user '{user_id}'")]
    CollectionNotFound {
        user_id: String,
        collection_id: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(cursor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            cursor: cursor.into(),
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            retry_after_seconds: None,
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::SourceUnavailable { .. })
    }

    /// Check if the caller should re-authenticate
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }

    /// Delay hint from the source, if it sent one
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::SourceUnavailable {
                retry_after_seconds,
                ..
            } => *retry_after_seconds,
            _ => None,
        }
    }
}

/// Result type alias for Cover Arts
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_query("search term is empty");
        assert_eq!(err.to_string(), "Invalid query: search term is empty");

        let err = Error::missing_field("api_base_url");
        assert_eq!(
            err.to_string(),
            "Missing required config field: api_base_url"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::CollectionNotFound {
            user_id: "u1".to_string(),
            collection_id: "c9".to_string(),
        };
        assert_eq!(err.to_string(), "Collection 'c9' not found for user 'u1'");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::source_unavailable("timeout").is_retryable());
        assert!(Error::SourceUnavailable {
            message: "429".to_string(),
            retry_after_seconds: Some(3),
        }
        .is_retryable());

        assert!(!Error::unauthorized("expired").is_retryable());
        assert!(!Error::malformed("bad json").is_retryable());
        assert!(!Error::invalid_query("empty").is_retryable());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_needs_reauth_and_retry_after() {
        assert!(Error::unauthorized("401").needs_reauth());
        assert!(!Error::source_unavailable("503").needs_reauth());

        let err = Error::SourceUnavailable {
            message: "rate limited".to_string(),
            retry_after_seconds: Some(7),
        };
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(Error::malformed("x").retry_after(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
