// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # origin-client - Origin-bound HTTP sessions
//!
//! A thin session layer over `reqwest` and `tokio-tungstenite`. A session
//! remembers an origin, a relative base path and a set of outgoing headers,
//! and feeds `Set-Cookie` values from responses back into later requests.
//!
//! ## Features
//!
//! - Origin + base path URL resolution with POSIX-style path joins
//! - Ordered header store with lazily evaluated values
//! - Automatic cookie jar (`Cookie` header is always computed fresh)
//! - Response hooks that can replace a response before the status check
//! - Form and JSON request bodies, query string encoding
//! - WebSocket connections carrying the session headers
//!
//! ## Example
//!
//! ```rust,no_run
//! use origin_client::{RequestOptions, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new("https://example.com")?;
//!     session.set_path("/api")?;
//!
//!     let login = Session::form_data([("user", "jane"), ("pass", "hunter2")], None);
//!     session.post("login", login).await?;
//!
//!     // cookies from the login response ride along automatically
//!     let profile = session.get("profile", RequestOptions::new()).await?;
//!     println!("{}", profile.text_lossy());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Session
pub use http::{Session, SessionConfig};

// Requests and responses
pub use http::{form_data, Params, RequestOptions, Response};
pub use http::{HookFn, ResponseHook};

// Cookies and headers
pub use http::{decode_cookies, encode_cookies, CookieJar, CookiePair};
pub use http::{HeaderSource, HeaderStore};

// URL helpers
pub use http::url::{encode_query, is_absolute, join_url};

// WebSocket
#[cfg(feature = "websocket")]
pub use http::{ConnectOptions, WebSocket};

/// origin-client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
