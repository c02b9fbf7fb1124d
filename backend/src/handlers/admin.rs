use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError, handlers::auth::resolve_session, models::session::Session,
    services::admin_gate::is_admin_request, state::AppState, types::RequestContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminAccessResponse {
    pub is_admin: bool,
}

/// Lets admin pages decide whether to render without triggering a 403.
pub async fn admin_access(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Json<AdminAccessResponse> {
    let is_admin =
        is_admin_request(state.sessions.as_ref(), &state.config.admin_roles, &ctx).await;
    Json(AdminAccessResponse { is_admin })
}

pub async fn admin_session(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Session>, AppError> {
    let session = resolve_session(&state, &ctx).await?;
    Ok(Json(session))
}
