// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Format an account creation time the way the landing page shows it.
pub fn format_member_since(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}
