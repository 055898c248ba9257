//! Error type definitions for the catalog service
//!
//! Failures only originate while acquiring playlist text. Parsing never fails,
//! so there is no parse error variant here.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist source errors
    #[error("{0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Playlist source specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// The origin did not answer within the fetch timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The origin answered with a non-success status
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Transport level failures (DNS, refused connection, body decoding)
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// No remote origin URL was configured
    #[error("No remote playlist origin configured")]
    NotConfigured,

    /// Reading or writing the cache artifact failed for a reason other than absence
    #[error("Cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The local fallback file exists but could not be read
    #[error("Fallback I/O error at {}: {source}", path.display())]
    FallbackIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failed and no local fallback file is available
    #[error("Playlist source unavailable: {cause}")]
    Unavailable {
        #[source]
        cause: Box<SourceError>,
    },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create a request failure error
    pub fn request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wrap a remote-tier failure once the fallback tier is exhausted
    pub fn unavailable(cause: SourceError) -> Self {
        Self::Unavailable {
            cause: Box::new(cause),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message_carries_cause() {
        let err = SourceError::unavailable(SourceError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Playlist source unavailable: HTTP error: 503 - Service Unavailable"
        );
        assert!(err.is_unavailable());
    }

    #[test]
    fn app_error_is_transparent_over_source_errors() {
        let err: AppError = SourceError::timeout("http://origin/list.m3u").into();
        assert_eq!(err.to_string(), "Connection timeout: http://origin/list.m3u");
    }
}
