// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session logic layer.

pub mod error_body;
pub mod session;
pub mod submission;

pub use session::{SessionManager, SessionState, LOGIN_FAILED, REGISTRATION_FAILED};
pub use submission::Submission;
