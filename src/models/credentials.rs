// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient form input for login and registration. Never persisted.

use crate::error::AuthError;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// Which account field the login screen asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(String),
    Email(String),
}

impl LoginIdentifier {
    /// JSON field name the backend expects for this identifier.
    pub fn field_name(&self) -> &'static str {
        match self {
            LoginIdentifier::Username(_) => "username",
            LoginIdentifier::Email(_) => "email",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            LoginIdentifier::Username(v) | LoginIdentifier::Email(v) => v,
        }
    }
}

/// Login form submission.
#[derive(Clone)]
pub struct LoginCredentials {
    pub identifier: LoginIdentifier,
    pub password: String,
}

impl LoginCredentials {
    pub fn username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: LoginIdentifier::Username(username.into()),
            password: password.into(),
        }
    }

    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: LoginIdentifier::Email(email.into()),
            password: password.into(),
        }
    }

    /// Request body for `auth/login/`.
    pub fn to_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(
            self.identifier.field_name().to_string(),
            Value::String(self.identifier.value().to_string()),
        );
        body.insert("password".to_string(), json!(self.password));
        Value::Object(body)
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form submission; serializes as the `auth/register/` body.
#[derive(Clone, Default, Serialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationForm {
    /// Local checks that must pass before anything is sent.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.password != self.password_confirm {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        let required = [
            ("Username", &self.username),
            ("Email", &self.email),
            ("Password", &self.password),
        ];
        if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AuthError::Validation(format!("{} is required", label)));
        }

        Ok(())
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}
