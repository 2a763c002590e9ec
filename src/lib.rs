// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CV-Session: client-side session layer for the CV builder
//!
//! This crate signs users in against the CV builder backend, keeps the
//! access/refresh token pair, and loads the signed-in user's profile,
//! refreshing an expired access token transparently.

pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod store;
pub mod time_utils;
pub mod transport;

pub use error::AuthError;
pub use services::{SessionManager, SessionState};
