// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::headers::SET_COOKIE;
use crate::error::{Error, Result};

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether a redirect was followed
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a response, e.g. as a replacement returned from a hook
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>, url: Url) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url,
            redirected: false,
            response_time_ms: 0,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get Set-Cookie headers.
    ///
    /// Values with bytes outside visible ASCII are decoded lossily instead of
    /// being dropped.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect()
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_response_status() {
        let resp = Response::new(StatusCode::OK, HeaderMap::new(), Bytes::new(), url());
        assert!(resp.is_ok());
        assert_eq!(resp.status_code(), 200);

        let resp = Response::new(StatusCode::NOT_FOUND, HeaderMap::new(), "", url());
        assert!(!resp.is_ok());
    }

    #[test]
    fn test_response_text() {
        let resp = Response::new(StatusCode::OK, HeaderMap::new(), "Hello, World!", url());
        assert_eq!(resp.text().unwrap(), "Hello, World!");
    }

    #[test]
    fn test_set_cookies() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1; Path=/"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));

        let resp = Response::new(StatusCode::OK, headers, Bytes::new(), url());
        assert_eq!(resp.set_cookies(), vec!["a=1; Path=/", "b=2"]);
    }

    #[test]
    fn test_set_cookies_keeps_non_ascii() {
        let mut headers = HeaderMap::new();
        headers.append(
            "set-cookie",
            HeaderValue::from_bytes("name=José; Path=/".as_bytes()).unwrap(),
        );

        let resp = Response::new(StatusCode::OK, headers, Bytes::new(), url());
        assert_eq!(resp.set_cookies(), vec!["name=José; Path=/"]);
    }
}
