//! Session oracle: resolves and terminates the session a request's headers
//! point at.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    models::{
        session::{Session, SessionUser},
        user::UserRole,
    },
    services::revocation::RevocationStore,
    utils::{
        cookies::{extract_cookie_value, ACCESS_COOKIE_NAME},
        jwt::{verify_access_token, Claims},
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session credential in request")]
    MissingCredential,
    #[error("invalid session token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("session already terminated")]
    AlreadyTerminated,
    #[error("session store unavailable")]
    Store(#[source] anyhow::Error),
}

/// Capability consumed by the admin gate and the logout handler. Headers are
/// forwarded untouched; implementations decide which of them carry the
/// credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionOracle: Send + Sync {
    /// `Ok(None)` when the request carries no live session.
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError>;
    async fn sign_out(&self, headers: &HeaderMap) -> Result<(), SessionError>;
}

/// Oracle backed by HS256 access tokens plus a revocation store.
pub struct JwtSessionOracle {
    secret: String,
    revocations: Arc<dyn RevocationStore>,
}

impl JwtSessionOracle {
    pub fn new(secret: impl Into<String>, revocations: Arc<dyn RevocationStore>) -> Self {
        Self {
            secret: secret.into(),
            revocations,
        }
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, SessionError> {
        self.revocations
            .is_revoked(jti)
            .await
            .map_err(SessionError::Store)
    }
}

#[async_trait]
impl SessionOracle for JwtSessionOracle {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        let Some(token) = extract_credential(headers) else {
            return Ok(None);
        };
        let claims = verify_access_token(&token, &self.secret)?;
        if self.is_revoked(&claims.jti).await? {
            tracing::debug!(jti = %claims.jti, "Presented token has been revoked");
            return Ok(None);
        }
        Ok(Some(Session::from(claims)))
    }

    async fn sign_out(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        let token = extract_credential(headers).ok_or(SessionError::MissingCredential)?;
        let claims = verify_access_token(&token, &self.secret)?;

        let remaining = claims.exp - Utc::now().timestamp();
        let ttl_seconds = u64::try_from(remaining).unwrap_or(0).max(1);
        let newly_revoked = self
            .revocations
            .revoke(&claims.jti, ttl_seconds)
            .await
            .map_err(SessionError::Store)?;
        if !newly_revoked {
            return Err(SessionError::AlreadyTerminated);
        }

        tracing::info!(user_id = %claims.sub, jti = %claims.jti, "Session terminated");
        Ok(())
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        let role = claims.role.parse::<UserRole>().ok();
        if role.is_none() {
            tracing::debug!(
                user_id = %claims.sub,
                role = %claims.role,
                "Token carries unrecognised role"
            );
        }
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC);
        Session {
            user: SessionUser {
                id: claims.sub,
                email: claims.email,
                name: claims.name,
                role,
            },
            expires_at,
        }
    }
}

/// Bearer token first, then the access cookie.
fn extract_credential(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_string);
    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| extract_cookie_value(raw, ACCESS_COOKIE_NAME))
    })
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}
