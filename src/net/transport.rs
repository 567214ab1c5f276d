//! `gloo-net` implementation of the portal HTTP transport.
//!
//! Client-side (csr): real `fetch` calls via `gloo-net`.
//! Native builds (tests, tooling): every send fails with a network error
//! since there is no browser to talk through.

#![allow(clippy::unused_async)]

use async_trait::async_trait;
use portal::api::{ApiError, ApiRequest, ApiResponse, HttpTransport};

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "http transport not available outside the browser";

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use portal::api::Method;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let prepared = match request.body {
                Some(body) => builder.header("Content-Type", "application/json").body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let authorization = resp.headers().get("Authorization");
            let body = resp.binary().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse {
                status,
                authorization,
                body,
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }
}
