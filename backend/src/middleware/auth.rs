use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError, services::admin_gate::is_admin_request, state::AppState,
    types::RequestContext,
};

// Admin-only routes: the gate decides, denial becomes 403.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = RequestContext::from_parts(request.headers(), request.extensions());
    if !is_admin_request(state.sessions.as_ref(), &state.config.admin_roles, &ctx).await {
        tracing::info!(
            request_id = ctx.request_id(),
            uri = %request.uri(),
            "Admin access denied"
        );
        return Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
