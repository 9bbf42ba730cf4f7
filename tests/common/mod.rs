// Common test utilities and helper structs
// Shared across all test files to avoid duplication

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use std::collections::HashMap;
use token_gate::{build_router, AppConfig, AppState, IdentityClaim, JwtConfig, JwtService};
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-gate-secret-hs256-minimum-32-characters-long";

/// Build an AppConfig without touching the process environment
pub fn test_config(vars: &[(&str, &str)]) -> AppConfig {
    let mut map: HashMap<String, String> = HashMap::new();
    map.insert("JWT_SECRET".to_string(), TEST_SECRET.to_string());
    map.insert("ENVIRONMENT".to_string(), "test".to_string());
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    AppConfig::from_lookup(|key| map.get(key).cloned()).unwrap()
}

/// Token service over an explicit secret and ttl
pub fn test_jwt_service(secret: &str, expiry: u64) -> JwtService {
    JwtService::new(JwtConfig::from_secret(secret, expiry, 1).unwrap())
}

pub fn alice() -> IdentityClaim {
    IdentityClaim::new("u1", "alice")
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(&self.app, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(&self.app, "GET", uri)
    }

    /// Issue a token with the app's own signing secret
    pub fn token_for(&self, claim: &IdentityClaim) -> String {
        self.state.jwt_service.issue(claim).unwrap()
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a Router,
    method: &'static str,
    uri: String,
    headers: Vec<(String, String)>,
}

impl<'a> TestRequest<'a> {
    pub fn new(app: &'a Router, method: &'static str, uri: &str) -> Self {
        Self {
            app,
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
        }
    }

    /// Set the raw Authorization header value
    pub fn authorization(mut self, value: &str) -> Self {
        self.headers
            .push((header::AUTHORIZATION.to_string(), value.to_string()));
        self
    }

    /// Present `token` as a bearer credential
    pub fn bearer(self, token: &str) -> Self {
        let value = format!("Bearer {}", token);
        self.authorization(&value)
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}

/// Setup test application with all dependencies
pub fn setup_test_app() -> TestApp {
    let config = test_config(&[]);
    let state = AppState::from_config(&config).unwrap();

    TestApp {
        app: build_router(state.clone()),
        state,
    }
}
