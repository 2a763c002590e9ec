// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models exchanged with the backend.

pub mod credentials;
pub mod token;
pub mod user;

pub use credentials::{LoginCredentials, LoginIdentifier, RegistrationForm};
pub use token::{AuthTokenResponse, RefreshResponse, TokenPair, VerifyResponse};
pub use user::{ProfileResponse, UserProfile};
