#![allow(dead_code)]
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request},
    response::Response,
    Router,
};
use storefront_backend::{
    app::build_router,
    config::Config,
    models::{session::Session, user::UserRole},
    services::{
        revocation::InMemoryRevocationStore,
        session::{JwtSessionOracle, SessionError, SessionOracle},
    },
    state::AppState,
    utils::jwt::create_access_token,
};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "a_secure_token_that_is_long_enough_123";

pub fn test_config() -> Config {
    config_with(&[])
}

pub fn config_with(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("BIND_ADDR".to_string(), "127.0.0.1:0".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// Router backed by the real JWT oracle and an in-memory revocation store.
pub fn test_app(config: Config) -> Router {
    let oracle = JwtSessionOracle::new(
        config.jwt_secret.clone(),
        Arc::new(InMemoryRevocationStore::new()),
    );
    build_router(AppState::new(config, Arc::new(oracle)))
}

pub fn app_with_oracle(oracle: impl SessionOracle + 'static) -> Router {
    build_router(AppState::new(test_config(), Arc::new(oracle)))
}

pub fn create_test_token(role: &str) -> String {
    let id = Uuid::new_v4().to_string();
    create_access_token(
        id.clone(),
        format!("user_{}@example.com", id),
        "Test User".into(),
        role.into(),
        TEST_JWT_SECRET,
        1,
    )
    .expect("create test token")
}

pub fn token_for(role: UserRole) -> String {
    create_test_token(role.as_str())
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("build request")
}

pub fn anonymous_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

/// Oracle whose every call fails, standing in for a provider outage.
pub struct UnreachableOracle;

#[async_trait]
impl SessionOracle for UnreachableOracle {
    async fn get_session(&self, _headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        Err(SessionError::Store(anyhow::anyhow!(
            "NetworkError: connection refused (sessions.internal:6379)"
        )))
    }

    async fn sign_out(&self, _headers: &HeaderMap) -> Result<(), SessionError> {
        Err(SessionError::Store(anyhow::anyhow!(
            "NetworkError: connection refused (sessions.internal:6379)"
        )))
    }
}
