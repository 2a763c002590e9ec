// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use async_trait::async_trait;
use cv_session::config::Config;
use cv_session::error::TransportError;
use cv_session::navigation::{Navigator, Route};
use cv_session::store::{MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use cv_session::transport::{ApiRequest, ApiResponse, HttpTransport};
use cv_session::SessionManager;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Scripted = Result<ApiResponse, TransportError>;

/// Backend stand-in: answers each path from a queue and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Queue a response for the next request to `path`.
    pub fn respond(&self, path: &'static str, status: u16, body: Value) {
        self.push(path, Ok(ApiResponse::new(status, body)));
    }

    /// Queue a transport failure for the next request to `path`.
    pub fn fail(&self, path: &'static str, err: TransportError) {
        self.push(path, Err(err));
    }

    fn push(&self, path: &'static str, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request.path;
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Unreachable(format!("unscripted {}", path))))
    }
}

/// Navigator that remembers every target.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Session manager wired to mocks, with handles to inspect them.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub store: Arc<MemoryTokenStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: SessionManager,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::test_default())
    }

    pub fn with_config(config: Config) -> Self {
        let transport = Arc::new(MockTransport::default());
        let store = Arc::new(MemoryTokenStore::new());
        let navigator = Arc::new(RecordingNavigator::default());

        let session = SessionManager::new(
            &config,
            transport.clone(),
            store.clone(),
            navigator.clone(),
        );

        Self {
            transport,
            store,
            navigator,
            session,
        }
    }

    /// Seed the store as if a previous login had happened.
    pub fn seed_tokens(&self, access: &str, refresh: &str) {
        self.store.set(ACCESS_TOKEN_KEY, access).unwrap();
        self.store.set(REFRESH_TOKEN_KEY, refresh).unwrap();
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).unwrap()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).unwrap()
    }
}

/// Login/registration success body.
pub fn token_body(access: &str, refresh: &str) -> Value {
    json!({ "token": { "access": access, "refresh": refresh } })
}

/// Profile endpoint success body.
pub fn profile_body(username: &str) -> Value {
    json!({
        "message": format!("Congratulations, {}!", username),
        "user": {
            "id": "0b9f3c1e-7d2a-4c55-9e61-5f0d2a7c8e11",
            "username": username,
            "email": format!("{}@example.com", username),
            "first_name": "",
            "last_name": "",
            "created_at": "2025-02-14T10:00:00Z",
            "last_logged_in": "2025-06-01T08:15:00Z"
        }
    })
}
