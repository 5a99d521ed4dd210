// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for origin-client
//!
//! Cookie codec, header store, URL helpers and the session client that
//! composes them.

mod cookie;
mod headers;
mod hook;
mod request;
mod response;
mod session;
pub mod url;
#[cfg(feature = "websocket")]
mod websocket;

pub use cookie::{decode_cookies, encode_cookies, CookieJar, CookiePair};
pub use headers::{materialize, HeaderProducer, HeaderSource, HeaderStore};
pub use hook::{HookFn, ResponseHook};
pub use request::{form_data, Params, RequestOptions};
pub use response::Response;
pub use session::{Session, SessionConfig};
#[cfg(feature = "websocket")]
pub use websocket::{websocket_url, ConnectOptions, WebSocket};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("origin-client/", env!("CARGO_PKG_VERSION"));

/// Header names the session manages
pub mod names {
    pub use super::headers::{
        CONTENT_TYPE, CONTENT_TYPE_FORM, COOKIE, ORIGIN, REFERER, SET_COOKIE,
    };
}
