// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for origin-client
//!
//! Construction and path errors are raised synchronously; request failures
//! carry the resolved URL and the status code the server answered with.

use thiserror::Error;

/// Result type alias for origin-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for origin-client
#[derive(Error, Debug)]
pub enum Error {
    /// Session origin is not an absolute URL
    #[error("origin must be an absolute URL: {origin}")]
    InvalidOrigin { origin: String },

    /// Base path must stay relative to the origin
    #[error("path must be relative to origin: {path}")]
    RelativePathRequired { path: String },

    /// Final response status was outside 2xx
    #[error("Fetch failed.\n\t- url: {url}\n\t- status: {status}")]
    RequestFailed { url: String, status: u16 },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// WebSocket handshake or transport failure
    #[error("WebSocket error: {reason}")]
    WebSocket { reason: String, url: Option<String> },

    /// Header cannot be put on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid origin error
    pub fn invalid_origin(origin: impl Into<String>) -> Self {
        Error::InvalidOrigin {
            origin: origin.into(),
        }
    }

    /// Create a relative path error
    pub fn relative_path_required(path: impl Into<String>) -> Self {
        Error::RelativePathRequired { path: path.into() }
    }

    /// Create a request failure error
    pub fn request_failed(url: impl Into<String>, status: u16) -> Self {
        Error::RequestFailed {
            url: url.into(),
            status,
        }
    }

    /// Create a WebSocket error with URL
    pub fn websocket_with_url(reason: impl Into<String>, url: impl Into<String>) -> Self {
        Error::WebSocket {
            reason: reason.into(),
            url: Some(url.into()),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::WebSocket { .. })
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(s) if (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(s) if (500..600).contains(&s))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::RequestFailed { url, .. } => Some(url),
            Error::WebSocket { url, .. } => url.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        let err = Error::request_failed("http://example.com/missing", 404);
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("http://example.com/missing"));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_error_accessors() {
        let err = Error::request_failed("http://example.com/", 503);
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.url(), Some("http://example.com/"));
        assert!(err.is_server_error());

        let err = Error::invalid_origin("/relative");
        assert_eq!(err.status_code(), None);
        assert!(!err.is_network());
    }
}
