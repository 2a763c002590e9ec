// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session manager: the single owner of the access/refresh token pair.
//!
//! Handles:
//! - Login and registration, persisting the issued token pair
//! - Bearer requests against the profile endpoint
//! - One refresh-and-retry when the access token is rejected with 401
//! - Tearing the session down when it cannot be recovered

use crate::config::Config;
use crate::error::{AuthError, TransportError};
use crate::models::{
    AuthTokenResponse, LoginCredentials, ProfileResponse, RefreshResponse, RegistrationForm,
    TokenPair, UserProfile, VerifyResponse,
};
use crate::navigation::{Navigator, Route, TracingNavigator};
use crate::services::error_body;
use crate::store::{FileTokenStore, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::transport::{endpoints, ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
use serde_json::json;
use std::sync::Arc;

/// Fallback shown when a rejected login carries no readable message.
pub const LOGIN_FAILED: &str = "Login failed";

/// Fallback shown when a rejected registration carries no readable message.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Client-side belief about the user, derived on every protected page load.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(UserProfile),
}

/// Mediates every authenticated interaction with the backend.
///
/// Each operation is one sequential pipeline; the only suspension points are
/// the backend calls. Overlapping calls on the same session are not
/// coordinated.
#[derive(Clone)]
pub struct SessionManager {
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    health_probe: bool,
}

impl SessionManager {
    /// Create a session manager over explicit collaborators.
    pub fn new(
        config: &Config,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
            health_probe: config.health_probe,
        }
    }

    /// Production wiring: reqwest transport, file token store, log-only navigation.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        let store = FileTokenStore::new(&config.token_store_path);

        Ok(Self::new(
            config,
            Arc::new(transport),
            Arc::new(store),
            Arc::new(TracingNavigator),
        ))
    }

    // ─── Login / Registration ────────────────────────────────────────────────

    /// Exchange credentials for a token pair.
    ///
    /// On success the pair is persisted and the user is sent to the landing
    /// page. Failures are terminal for this submission; nothing is retried.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, AuthError> {
        let request = ApiRequest::post(endpoints::LOGIN, credentials.to_body());

        let outcome = self.submit_for_tokens(request, LOGIN_FAILED).await;
        match &outcome {
            Ok(_) => tracing::info!(
                identifier_field = credentials.identifier.field_name(),
                "Login succeeded"
            ),
            Err(e) => tracing::warn!(error = %e, "Login failed"),
        }
        outcome
    }

    /// Create an account and sign in with the issued token pair.
    ///
    /// Local validation runs first and short-circuits without any request.
    /// When the health probe is enabled, an unreachable backend is reported
    /// before the form is sent.
    pub async fn register(&self, form: &RegistrationForm) -> Result<TokenPair, AuthError> {
        form.validate()?;

        if self.health_probe {
            self.health().await?;
        }

        let body = serde_json::to_value(form)
            .map_err(|e| AuthError::Validation(format!("Invalid registration form: {}", e)))?;
        let request = ApiRequest::post(endpoints::REGISTER, body);

        let outcome = self.submit_for_tokens(request, REGISTRATION_FAILED).await;
        match &outcome {
            Ok(_) => tracing::info!(username = %form.username, "Registration succeeded"),
            Err(e) => tracing::warn!(error = %e, "Registration failed"),
        }
        outcome
    }

    /// Lightweight reachability probe against `auth/health/`.
    pub async fn health(&self) -> Result<(), AuthError> {
        let response = self.transport.send(ApiRequest::get(endpoints::HEALTH)).await?;

        if response.is_success() {
            Ok(())
        } else {
            tracing::warn!(status = response.status, "Health probe failed");
            Err(AuthError::connectivity())
        }
    }

    // ─── Profile ─────────────────────────────────────────────────────────────

    /// Fetch the signed-in user's profile, refreshing the access token once
    /// if the backend rejects it.
    ///
    /// 1. No stored access token: `Unauthenticated`, no request
    /// 2. Profile request with the access token
    /// 3. On 401, exchange the refresh token for a new access token
    /// 4. Persist only the new access token, then retry the profile once
    /// 5. Any unrecoverable session failure clears both tokens
    pub async fn fetch_profile(&self) -> Result<UserProfile, AuthError> {
        // ─────────────────────────────────────────────────────────────
        // STEP 1: Access token must be present
        // ─────────────────────────────────────────────────────────────
        let Some(access_token) = self.read_token(ACCESS_TOKEN_KEY) else {
            tracing::debug!("No access token stored");
            return Err(AuthError::Unauthenticated);
        };

        // ─────────────────────────────────────────────────────────────
        // STEP 2: Profile request with the stored access token
        // ─────────────────────────────────────────────────────────────
        let response = self.request_profile(&access_token).await?;

        if response.is_success() {
            return Self::parse_profile(response);
        }

        if !response.is_unauthorized() {
            // Application error, the session itself is still trusted
            tracing::warn!(status = response.status, "Profile request failed");
            return Err(AuthError::profile_load_failed());
        }

        // ─────────────────────────────────────────────────────────────
        // STEP 3: Access token rejected - exchange the refresh token
        // ─────────────────────────────────────────────────────────────
        tracing::info!("Access token rejected, refreshing");

        let Some(refresh_token) = self.read_token(REFRESH_TOKEN_KEY) else {
            tracing::info!("No refresh token stored, ending session");
            self.end_session();
            return Err(AuthError::Unauthenticated);
        };

        let Some(new_access) = self.exchange_refresh_token(&refresh_token).await else {
            self.end_session();
            return Err(AuthError::Unauthenticated);
        };

        // ─────────────────────────────────────────────────────────────
        // STEP 4: Persist the new access token, then retry exactly once
        // ─────────────────────────────────────────────────────────────
        self.store.set(ACCESS_TOKEN_KEY, &new_access)?;
        tracing::info!("Access token refreshed");

        // No response at all is a connectivity problem, not a session one
        let retry = self.request_profile(&new_access).await?;

        if retry.is_success() {
            return Self::parse_profile(retry);
        }

        if retry.is_unauthorized() {
            tracing::warn!("Refreshed access token rejected, ending session");
            self.end_session();
            return Err(AuthError::Unauthenticated);
        }

        tracing::warn!(status = retry.status, "Profile retry failed");
        Err(AuthError::profile_load_failed())
    }

    /// Page-mount flow of a protected page.
    ///
    /// An unrecoverable session sends the user to the login view and reports
    /// `Anonymous`; other failures are returned for the page to display.
    pub async fn session_state(&self) -> Result<SessionState, AuthError> {
        match self.fetch_profile().await {
            Ok(profile) => Ok(SessionState::Authenticated(profile)),
            Err(AuthError::Unauthenticated) => {
                self.navigator.navigate(Route::Login);
                Ok(SessionState::Anonymous)
            }
            Err(e) => Err(e),
        }
    }

    /// Ask the backend whether the stored access token is still accepted.
    ///
    /// This never refreshes and never clears tokens.
    pub async fn verify_session(&self) -> Result<bool, AuthError> {
        let Some(access_token) = self.read_token(ACCESS_TOKEN_KEY) else {
            return Ok(false);
        };

        let request = ApiRequest::post(endpoints::VERIFY, json!({})).with_bearer(access_token);
        let response = self.transport.send(request).await?;

        if response.is_success() {
            let verified = serde_json::from_value::<VerifyResponse>(response.body)
                .map(|v| v.valid)
                .unwrap_or(false);
            return Ok(verified);
        }
        if response.is_server_error() {
            return Err(AuthError::server());
        }
        Ok(false)
    }

    // ─── Logout ──────────────────────────────────────────────────────────────

    /// Drop both tokens and return to the login view. No network effect.
    pub fn logout(&self) {
        self.end_session();
        tracing::info!("Logged out");
        self.navigator.navigate(Route::Login);
    }

    /// Whether an access token is stored. A hint only: the backend has not
    /// been asked whether it still accepts it.
    pub fn is_authenticated_hint(&self) -> bool {
        self.read_token(ACCESS_TOKEN_KEY).is_some()
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    /// Send a login/registration request and persist the issued pair.
    async fn submit_for_tokens(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<TokenPair, AuthError> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(Self::classify_rejection(&response, fallback));
        }

        let pair = serde_json::from_value::<AuthTokenResponse>(response.body)
            .map(|r| r.token)
            .map_err(|e| {
                tracing::error!(error = %e, "Success response without token pair");
                AuthError::server()
            })?;

        self.store.set_pair(&pair)?;
        self.navigator.navigate(Route::Landing);
        Ok(pair)
    }

    /// Map a non-success login/registration response to an error kind.
    fn classify_rejection(response: &ApiResponse, fallback: &str) -> AuthError {
        if response.is_server_error() {
            tracing::warn!(status = response.status, "Backend server error");
            return AuthError::server();
        }

        let message =
            error_body::first_message(&response.body).unwrap_or_else(|| fallback.to_string());
        AuthError::Credentials(message)
    }

    async fn request_profile(&self, access_token: &str) -> Result<ApiResponse, TransportError> {
        let request = ApiRequest::get(endpoints::PROFILE).with_bearer(access_token);
        self.transport.send(request).await
    }

    fn parse_profile(response: ApiResponse) -> Result<UserProfile, AuthError> {
        match serde_json::from_value::<ProfileResponse>(response.body) {
            Ok(profile) => {
                if let Some(message) = &profile.message {
                    tracing::debug!(message = %message, "Profile loaded");
                }
                Ok(profile.user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed profile response");
                Err(AuthError::profile_load_failed())
            }
        }
    }

    /// Trade the refresh token for a new access token. `None` on any failure.
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Option<String> {
        let request = ApiRequest::post(endpoints::TOKEN_REFRESH, json!({ "refresh": refresh_token }));

        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh request failed");
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(status = response.status, "Token refresh rejected");
            return None;
        }

        match serde_json::from_value::<RefreshResponse>(response.body) {
            Ok(r) if !r.access.is_empty() => Some(r.access),
            _ => {
                tracing::warn!("Token refresh response without access token");
                None
            }
        }
    }

    /// Read a token; unreadable storage counts as no token.
    fn read_token(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, key, "Token store unreadable");
                None
            }
        }
    }

    /// Remove both tokens. Never fails; a store error is logged.
    fn end_session(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear token store");
        }
    }
}
