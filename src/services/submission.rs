// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-form submission state.

use crate::error::AuthError;

/// What a form shows between and during submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    in_flight: bool,
    message: Option<String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an attempt. The previous attempt's message is dropped here, before
    /// the new outcome is known.
    pub fn begin(&mut self) {
        self.message = None;
        self.in_flight = true;
    }

    /// Record the outcome of the attempt started by [`Submission::begin`].
    pub fn finish<T>(&mut self, outcome: &Result<T, AuthError>) {
        self.in_flight = false;
        self.message = outcome.as_ref().err().map(|e| e.user_message().to_string());
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
