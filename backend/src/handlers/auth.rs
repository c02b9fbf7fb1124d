use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppError,
    models::session::Session,
    services::logout::sign_out,
    state::AppState,
    types::RequestContext,
    utils::cookies::{build_clear_cookie, ACCESS_COOKIE_NAME, ACCESS_COOKIE_PATH},
};

pub async fn logout(State(state): State<AppState>, ctx: RequestContext) -> Response {
    match sign_out(state.sessions.as_ref(), &ctx).await {
        Ok(confirmation) => {
            let mut response = confirmation.into_response();
            let cookie = build_clear_cookie(
                ACCESS_COOKIE_NAME,
                ACCESS_COOKIE_PATH,
                state.config.cookie_options(),
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
        Err(failure) => failure.into_response(),
    }
}

pub async fn current_session(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Session>, AppError> {
    let session = resolve_session(&state, &ctx).await?;
    Ok(Json(session))
}

/// Resolves the caller's session, mapping both "no session" and lookup
/// failures to 401.
pub(crate) async fn resolve_session(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<Session, AppError> {
    match state.sessions.get_session(&ctx.headers).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(AppError::Unauthorized("No active session".to_string())),
        Err(err) => {
            tracing::warn!(
                request_id = ctx.request_id(),
                error = %err,
                "Session lookup failed"
            );
            Err(AppError::Unauthorized("No active session".to_string()))
        }
    }
}
