// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response hooks
//!
//! A hook sees every response before the status check and may swap in a
//! replacement by returning `Some(response)`.
//!
//! # Example
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use origin_client::error::Result;
//! use origin_client::http::{RequestOptions, Response, ResponseHook};
//!
//! struct StatusLogger;
//!
//! #[async_trait]
//! impl ResponseHook for StatusLogger {
//!     async fn on_response(
//!         &self,
//!         response: &Response,
//!         url: &str,
//!         _options: &RequestOptions,
//!     ) -> Result<Option<Response>> {
//!         println!("{} -> {}", url, response.status);
//!         Ok(None)
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::request::RequestOptions;
use super::response::Response;
use crate::error::Result;

/// Hook run on each response before the status check
#[async_trait]
pub trait ResponseHook: Send + Sync {
    /// Inspect a response; `Some` replaces it, `None` keeps the original.
    ///
    /// An error aborts the request with that error.
    async fn on_response(
        &self,
        response: &Response,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Option<Response>>;
}

/// Adapter turning a synchronous closure into a [`ResponseHook`]
pub struct HookFn<F>(pub F);

#[async_trait]
impl<F> ResponseHook for HookFn<F>
where
    F: Fn(&Response, &str, &RequestOptions) -> Option<Response> + Send + Sync,
{
    async fn on_response(
        &self,
        response: &Response,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Option<Response>> {
        Ok((self.0)(response, url, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use url::Url;

    fn response(status: StatusCode) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            "",
            Url::parse("http://example.com/").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_hook_fn_replaces() {
        let hook = HookFn(|res: &Response, _url: &str, _options: &RequestOptions| {
            if res.status == StatusCode::NOT_FOUND {
                Some(response(StatusCode::OK))
            } else {
                None
            }
        });

        let options = RequestOptions::new();
        let replaced = hook
            .on_response(&response(StatusCode::NOT_FOUND), "http://example.com/", &options)
            .await
            .unwrap();
        assert_eq!(replaced.map(|r| r.status), Some(StatusCode::OK));

        let kept = hook
            .on_response(&response(StatusCode::OK), "http://example.com/", &options)
            .await
            .unwrap();
        assert!(kept.is_none());
    }
}
