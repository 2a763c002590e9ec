// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP boundary between the session layer and the backend.
//!
//! The session manager only ever sees [`ApiRequest`] / [`ApiResponse`], so
//! tests can script the backend without a network.

pub mod http;

pub use http::ReqwestTransport;

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Backend endpoint paths, relative to the configured API root.
pub mod endpoints {
    pub const LOGIN: &str = "auth/login/";
    pub const REGISTER: &str = "auth/register/";
    pub const HEALTH: &str = "auth/health/";
    pub const PROFILE: &str = "auth/profile/";
    pub const VERIFY: &str = "auth/verify/";
    pub const TOKEN_REFRESH: &str = "token/refresh/";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One backend call.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    /// Access token for the `Authorization: Bearer` header
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            bearer: None,
            body: None,
        }
    }

    pub fn post(path: &'static str, body: Value) -> Self {
        Self {
            method: Method::Post,
            path,
            bearer: None,
            body: Some(body),
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

// Bodies carry passwords and tokens; only the shape is printed.
impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer", &self.bearer.is_some())
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// Settled backend response. `body` is `Value::Null` when it was empty or not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Capability to issue requests against the backend.
///
/// Any status code, including 4xx/5xx, is an `Ok` response; `Err` means no
/// response was received at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
