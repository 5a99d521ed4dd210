// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! WebSocket connections opened through a session

use indexmap::IndexMap;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::{connect_async_with_config, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use url::Url;

use super::request::Params;
use super::session::Session;
use crate::error::{Error, Result};

/// Live WebSocket connection
pub type WebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// HTTP scheme to WebSocket scheme
const SCHEME_MAP: &[(&str, &str)] = &[("http", "ws"), ("https", "wss")];

/// Options for a single connection
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Handshake headers, laid over the session headers
    pub headers: IndexMap<String, String>,
    /// Query parameters appended to the resolved URL
    pub params: Option<Params>,
    /// Protocol configuration
    pub config: Option<WebSocketConfig>,
}

impl ConnectOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a handshake header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(key.into(), Some(value.into()));
        self
    }

    /// Set protocol configuration
    pub fn config(mut self, config: WebSocketConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Map an `http`/`https` URL onto `ws`/`wss`; WebSocket URLs pass through
pub fn websocket_url(url: &str) -> Result<Url> {
    let mut parsed = Url::parse(url)?;
    let scheme = parsed.scheme().to_string();
    if scheme == "ws" || scheme == "wss" {
        return Ok(parsed);
    }

    let mapped = SCHEME_MAP
        .iter()
        .find(|(from, _)| *from == scheme)
        .map(|(_, to)| *to)
        .ok_or_else(|| {
            Error::websocket_with_url(format!("unsupported scheme '{}'", scheme), url)
        })?;
    parsed
        .set_scheme(mapped)
        .map_err(|_| Error::websocket_with_url(format!("cannot switch to '{}'", mapped), url))?;
    Ok(parsed)
}

impl Session {
    /// Open a WebSocket connection.
    ///
    /// The target is resolved like a request, then mapped onto the WebSocket
    /// scheme. Cookies set by the handshake response are not captured.
    pub async fn connect(
        &self,
        target: impl AsRef<str>,
        options: ConnectOptions,
    ) -> Result<WebSocket> {
        let url = self.build_url(target.as_ref(), options.params.as_ref())?;
        let ws_url = websocket_url(&url)?;

        let mut request = ws_url
            .as_str()
            .into_client_request()
            .map_err(|e| Error::websocket_with_url(e.to_string(), ws_url.as_str()))?;

        for (name, value) in self.outgoing_headers(&options.headers) {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_header(&name, e.to_string()))?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|e| Error::invalid_header(&name, e.to_string()))?;
            request.headers_mut().insert(header_name, header_value);
        }

        debug!(url = %ws_url, "Opening WebSocket");
        let (stream, response) = connect_async_with_config(request, options.config, false)
            .await
            .map_err(|e| Error::websocket_with_url(e.to_string(), ws_url.as_str()))?;

        info!(url = %ws_url, status = response.status().as_u16(), "WebSocket connected");
        Ok(stream)
    }
}
