// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extraction of a single user-facing message from backend error bodies.
//!
//! The backend answers rejected input in one of three shapes:
//! `{"non_field_errors": [..]}`, `{"detail": ".."}`, or a map of field name to
//! a list of messages. Anything else yields `None` and the caller falls back
//! to a generic message.

use serde_json::Value;

/// First message in the body, in document order.
pub fn first_message(body: &Value) -> Option<String> {
    let fields = body.as_object()?;

    if let Some(msg) = fields.get("non_field_errors").and_then(message_of) {
        return Some(msg);
    }
    if let Some(msg) = fields.get("detail").and_then(message_of) {
        return Some(msg);
    }

    fields.values().find_map(message_of)
}

/// Message carried by one field: a string, or the first string of a list.
fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}
