// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Origin-bound session client
//!
//! A [`Session`] resolves targets against its origin and base path, sends the
//! session headers with every call and absorbs `Set-Cookie` values from
//! successful responses into its cookie jar.

use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::{debug, info, warn};
use url::Url;

use super::cookie::CookieJar;
use super::headers::{HeaderSource, HeaderStore, COOKIE, ORIGIN, REFERER};
use super::hook::{HookFn, ResponseHook};
use super::request::{self, Params, RequestOptions};
use super::response::Response;
use super::url::{encode_query, is_absolute, join_url};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Transport-level headers, overridden by session and per-call headers
    pub default_headers: HeaderMap,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl SessionConfig {
    /// Create a new session config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set transport-level default headers
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }
}

/// HTTP session bound to one origin.
///
/// Clones share headers, base path, cookie jar and response hook.
#[derive(Clone)]
pub struct Session {
    client: Client,
    config: SessionConfig,
    origin: String,
    path: Arc<RwLock<String>>,
    headers: Arc<RwLock<HeaderStore>>,
    cookie_jar: CookieJar,
    response_hook: Arc<RwLock<Option<Arc<dyn ResponseHook>>>>,
}

impl Session {
    /// Create a session for `origin` with default configuration
    pub fn new(origin: impl AsRef<str>) -> Result<Self> {
        Self::with_config(origin, SessionConfig::default())
    }

    /// Create a session for `origin` with custom configuration.
    ///
    /// The origin is reduced to scheme, host and port.
    pub fn with_config(origin: impl AsRef<str>, config: SessionConfig) -> Result<Self> {
        let origin = normalize_origin(origin.as_ref())?;

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone())
            .cookie_store(false); // the session jar owns cookie state

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;
        let cookie_jar = CookieJar::new();

        let mut headers = HeaderStore::new();
        headers.upsert(ORIGIN, origin.as_str());
        headers.upsert(REFERER, origin.as_str());
        let jar = cookie_jar.clone();
        headers.upsert(COOKIE, HeaderSource::lazy(move || Some(jar.header_value())));

        debug!(origin = %origin, "Session created");

        Ok(Self {
            client,
            config,
            origin,
            path: Arc::new(RwLock::new("/".to_string())),
            headers: Arc::new(RwLock::new(headers)),
            cookie_jar,
            response_hook: Arc::new(RwLock::new(None)),
        })
    }

    /// Turn `body` into form-encoded request options
    pub fn form_data<I, K, V>(body: I, options: Option<RequestOptions>) -> RequestOptions
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        request::form_data(body, options)
    }

    /// Normalized origin (`scheme://host[:port]`)
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Get session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Current `Cookie` header value
    pub fn cookie_header(&self) -> String {
        self.cookie_jar.header_value()
    }

    /// Merge raw `Set-Cookie` values into the jar, returning the new header value
    pub fn set_cookies<I, S>(&self, raw: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cookie_jar.merge_set_cookies(raw)
    }

    /// Materialized session headers
    pub fn headers(&self) -> IndexMap<String, String> {
        self.headers.read().materialize()
    }

    /// Set a session header, keeping its position if it already exists
    pub fn set_header(&self, key: impl Into<String>, value: impl Into<HeaderSource>) {
        self.headers.write().upsert(key, value);
    }

    /// Set a session header computed on every call
    pub fn set_header_fn<F>(&self, key: impl Into<String>, producer: F)
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.headers.write().upsert(key, HeaderSource::lazy(producer));
    }

    /// Remove a session header
    pub fn remove_header(&self, key: &str) {
        self.headers.write().remove(key);
    }

    /// Current base path
    pub fn path(&self) -> String {
        self.path.read().clone()
    }

    /// Replace the base path; absolute URLs are rejected
    pub fn set_path(&self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        if is_absolute(&path) {
            return Err(Error::relative_path_required(path));
        }
        *self.path.write() = path;
        Ok(())
    }

    /// Register the response hook, replacing any previous one
    pub fn on_response(&self, hook: impl ResponseHook + 'static) {
        *self.response_hook.write() = Some(Arc::new(hook));
    }

    /// Register a synchronous closure as the response hook
    pub fn on_response_fn<F>(&self, hook: F)
    where
        F: Fn(&Response, &str, &RequestOptions) -> Option<Response> + Send + Sync + 'static,
    {
        self.on_response(HookFn(hook));
    }

    /// Remove the response hook
    pub fn clear_response_hook(&self) {
        *self.response_hook.write() = None;
    }

    /// Join segments onto origin and base path
    pub fn join<I, S>(&self, segments: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = std::iter::once(self.path())
            .chain(segments.into_iter().map(|s| s.as_ref().to_string()));
        join_url(&self.origin, segments)
    }

    /// Resolve a target: absolute targets pass through, anything else is
    /// joined onto origin and base path; the query string goes last.
    pub fn build_url(&self, target: &str, params: Option<&Params>) -> Result<String> {
        let mut url = if is_absolute(target) {
            target.to_string()
        } else {
            self.join([target])?
        };
        if let Some(params) = params {
            url.push_str(&encode_query(params.iter().map(|(k, v)| (k, v.as_ref()))));
        }
        Ok(url)
    }

    /// Session headers with `overrides` laid on top
    pub(crate) fn outgoing_headers(
        &self,
        overrides: &IndexMap<String, String>,
    ) -> IndexMap<String, String> {
        let mut headers = self.headers();
        for (key, value) in overrides {
            headers.insert(key.clone(), value.clone());
        }
        headers
    }

    /// Execute a request
    pub async fn request(
        &self,
        target: impl AsRef<str>,
        options: RequestOptions,
    ) -> Result<Response> {
        let url = self.build_url(target.as_ref(), options.params.as_ref())?;
        let request_url = Url::parse(&url)?;
        let headers = to_header_map(&self.outgoing_headers(&options.headers))?;

        debug!(method = %options.method, url = %url, headers = headers.len(), "Sending request");
        let start = Instant::now();

        let mut builder = self
            .client
            .request(options.method.clone(), request_url.clone())
            .headers(headers);
        if let Some(ref body) = options.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut response = Response {
            status,
            headers,
            body,
            redirected: final_url != request_url,
            url: final_url,
            response_time_ms: start.elapsed().as_millis() as u64,
        };

        let hook = self.response_hook.read().clone();
        if let Some(hook) = hook {
            if let Some(replacement) = hook.on_response(&response, &url, &options).await? {
                debug!(url = %url, status = %replacement.status, "Response replaced by hook");
                response = replacement;
            }
        }

        if !response.is_ok() {
            warn!(url = %url, status = response.status_code(), "Request failed");
            return Err(Error::request_failed(url, response.status_code()));
        }

        let set_cookies = response.set_cookies();
        if !set_cookies.is_empty() {
            self.cookie_jar.merge_set_cookies(set_cookies);
        }

        info!(
            method = %options.method,
            url = %url,
            status = response.status_code(),
            elapsed_ms = response.response_time_ms,
            "Request completed"
        );
        Ok(response)
    }

    /// Execute a GET request; the method in `options` is ignored
    pub async fn get(&self, target: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(target, options.method(Method::GET)).await
    }

    /// Execute a POST request; the method in `options` is ignored
    pub async fn post(&self, target: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(target, options.method(Method::POST)).await
    }
}

/// Validate an absolute URL and reduce it to its origin
fn normalize_origin(origin: &str) -> Result<String> {
    if !is_absolute(origin) {
        return Err(Error::invalid_origin(origin));
    }
    let url = Url::parse(origin).map_err(|_| Error::invalid_origin(origin))?;
    let normalized = url.origin();
    if !normalized.is_tuple() {
        return Err(Error::invalid_origin(origin));
    }
    Ok(normalized.ascii_serialization())
}

/// Convert materialized headers into a wire header map; later keys win
fn to_header_map(headers: &IndexMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_header(name, e.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
