// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `reqwest`-backed transport used in production.

use super::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::config::Config;
use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Backend API client.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport whose every request is bounded by the configured timeout.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Unreachable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self::with_client(http, &config.api_base_url))
    }

    /// Use a custom HTTP client (for connection pool reuse).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(request.path);
        tracing::debug!(method = ?request.method, url = %url, "Backend request");

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();

        // Error pages are often HTML; only the status matters then.
        let text = response.text().await.map_err(map_reqwest_error)?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        tracing::debug!(status, url = %url, "Backend response");
        Ok(ApiResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Unreachable(err.to_string())
    }
}
