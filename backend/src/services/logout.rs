//! Session termination and its fixed HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{services::session::SessionOracle, types::RequestContext};

pub const LOGOUT_SUCCESS_MESSAGE: &str = "Logout successful";
pub const LOGOUT_FAILURE_MESSAGE: &str = "Logout failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutConfirmation {
    pub message: String,
}

impl Default for LogoutConfirmation {
    fn default() -> Self {
        Self {
            message: LOGOUT_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Generic failure body. The oracle error is logged, never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutFailure {
    pub error: String,
}

impl Default for LogoutFailure {
    fn default() -> Self {
        Self {
            error: LOGOUT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for LogoutConfirmation {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl IntoResponse for LogoutFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

pub async fn sign_out(
    oracle: &dyn SessionOracle,
    ctx: &RequestContext,
) -> Result<LogoutConfirmation, LogoutFailure> {
    match oracle.sign_out(&ctx.headers).await {
        Ok(()) => Ok(LogoutConfirmation::default()),
        Err(err) => {
            tracing::error!(
                request_id = ctx.request_id(),
                error = %err,
                "Failed to terminate session"
            );
            Err(LogoutFailure::default())
        }
    }
}
