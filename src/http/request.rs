// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call request options

use std::time::Duration;

use bytes::Bytes;
use indexmap::IndexMap;
use reqwest::Method;
use serde::Serialize;

use super::headers::{CONTENT_TYPE, CONTENT_TYPE_FORM};
use super::url::encode_uri;
use crate::error::Result;

/// Query parameters; `None` values are left out of the query string
pub type Params = IndexMap<String, Option<String>>;

/// Options for a single request.
///
/// Headers given here are laid over the session headers and win on conflict.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Request method
    pub method: Method,
    /// Per-call headers
    pub headers: IndexMap<String, String>,
    /// Request body
    pub body: Option<Bytes>,
    /// Query parameters appended to the resolved URL
    pub params: Option<Params>,
    /// Request timeout, overriding the session default
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: IndexMap::new(),
            body: None,
            params: None,
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Create default options (GET, no body)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set multiple headers
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header(CONTENT_TYPE, "application/json"))
    }

    /// Set a form body.
    ///
    /// Fields are joined as `key=value` with `&` and the whole string gets a
    /// single URI-encoding pass, so `&` or `=` inside a value is not escaped.
    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let data = fields
            .into_iter()
            .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(Bytes::from(encode_uri(&data)));
        self.header(CONTENT_TYPE, CONTENT_TYPE_FORM)
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(key.into(), Some(value.into()));
        self
    }

    /// Set all query parameters
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Turn `body` into a form-encoded request on top of `options`
pub fn form_data<I, K, V>(body: I, options: Option<RequestOptions>) -> RequestOptions
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    options.unwrap_or_default().form(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = RequestOptions::new();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
        assert!(options.params.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = RequestOptions::new()
            .method(Method::PUT)
            .header("x-custom", "value")
            .param("page", "2")
            .timeout(Duration::from_secs(5));

        assert_eq!(options.method, Method::PUT);
        assert_eq!(options.headers.get("x-custom").map(String::as_str), Some("value"));
        assert_eq!(
            options.params.unwrap().get("page"),
            Some(&Some("2".to_string()))
        );
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_form_data() {
        let options = form_data(
            [("user", "jane doe"), ("note", "a&b=c")],
            Some(RequestOptions::new().header("X-Trace", "1")),
        );

        assert_eq!(
            options.body.as_deref(),
            Some(&b"user=jane%20doe&note=a&b=c"[..])
        );
        assert_eq!(options.headers.get("X-Trace").map(String::as_str), Some("1"));
        assert_eq!(
            options.headers.get("Content-Type").map(String::as_str),
            Some(CONTENT_TYPE_FORM)
        );
    }

    #[test]
    fn test_form_overrides_content_type() {
        let options = RequestOptions::new()
            .header("Content-Type", "text/plain")
            .form([("a", "1")]);
        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.headers["Content-Type"], CONTENT_TYPE_FORM);
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::new()
            .json(&serde_json::json!({"id": 1}))
            .unwrap();
        assert_eq!(options.body.as_deref(), Some(&br#"{"id":1}"#[..]));
        assert_eq!(options.headers["Content-Type"], "application/json");
    }
}
