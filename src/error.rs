// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session error types with one user-facing message per failure.

/// Message shown when the backend cannot be reached.
pub const CONNECTIVITY_MESSAGE: &str = "Unable to connect to the server. Please try again later.";

/// Message shown when the backend answers with a 5xx.
pub const SERVER_MESSAGE: &str = "Server error. Please try again later.";

/// Message shown when the profile endpoint fails for a non-session reason.
pub const PROFILE_LOAD_MESSAGE: &str = "Failed to load user profile";

/// Every failure the session layer reports to its caller.
///
/// Transport internals never leak past [`crate::services::SessionManager`];
/// they are folded into one of these kinds first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Local input check failed; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Backend unreachable: {0}")]
    Connectivity(String),

    #[error("Backend error: {0}")]
    Server(String),

    /// The backend rejected the submitted input with a 4xx.
    #[error("Rejected by backend: {0}")]
    Credentials(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Profile unavailable: {0}")]
    ProfileLoadFailed(String),

    /// The local token store could not be written.
    #[error("Token storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// The single human-readable message a form should display.
    pub fn user_message(&self) -> &str {
        match self {
            AuthError::Validation(msg)
            | AuthError::Connectivity(msg)
            | AuthError::Server(msg)
            | AuthError::Credentials(msg)
            | AuthError::ProfileLoadFailed(msg) => msg.as_str(),
            AuthError::Storage(_) => "Unable to save your session on this device.",
            AuthError::Unauthenticated => "Your session has expired. Please sign in again.",
        }
    }

    /// Whether the caller should send the user back to the login view.
    pub fn requires_login(&self) -> bool {
        matches!(self, AuthError::Unauthenticated)
    }

    pub(crate) fn connectivity() -> Self {
        AuthError::Connectivity(CONNECTIVITY_MESSAGE.to_string())
    }

    pub(crate) fn server() -> Self {
        AuthError::Server(SERVER_MESSAGE.to_string())
    }

    pub(crate) fn profile_load_failed() -> Self {
        AuthError::ProfileLoadFailed(PROFILE_LOAD_MESSAGE.to_string())
    }
}

impl From<crate::store::StoreError> for AuthError {
    fn from(err: crate::store::StoreError) -> Self {
        tracing::error!(error = %err, "Token store failure");
        AuthError::Storage(err.to_string())
    }
}

/// Failure below the HTTP layer: no status code was ever received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request could not reach the server: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    Timeout,
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        tracing::warn!(error = %err, "Transport failure");
        AuthError::connectivity()
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AuthError>;
