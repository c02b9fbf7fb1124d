//! Explicit per-request context handed to the admin gate and the logout
//! operation instead of reading ambient request state.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Extensions, HeaderMap},
};

use crate::middleware::request_id::RequestId;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request headers, forwarded to the session oracle unmodified.
    pub headers: HeaderMap,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn from_parts(headers: &HeaderMap, extensions: &Extensions) -> Self {
        Self {
            headers: headers.clone(),
            request_id: extensions.get::<RequestId>().map(|id| id.0.clone()),
        }
    }

    /// Request id for log fields; `-` when the request id middleware did not run.
    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, &parts.extensions))
    }
}
