#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::admin::AdminAccessResponse,
    models::{
        session::{Session, SessionUser},
        user::UserRole,
    },
    services::logout::{LogoutConfirmation, LogoutFailure},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        logout_doc,
        current_session_doc,
        admin_access_doc,
        admin_session_doc
    ),
    components(
        schemas(
            Session,
            SessionUser,
            UserRole,
            LogoutConfirmation,
            LogoutFailure,
            AdminAccessResponse
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Session lookup and logout"),
        (name = "Admin", description = "Admin console access checks")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session terminated", body = LogoutConfirmation),
        (status = 500, description = "Session could not be terminated", body = LogoutFailure)
    ),
    tag = "Auth"
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "No active session", body = serde_json::Value)
    ),
    tag = "Auth"
)]
fn current_session_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/access",
    responses((status = 200, description = "Admin gate decision", body = AdminAccessResponse)),
    tag = "Admin"
)]
fn admin_access_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/session",
    responses(
        (status = 200, description = "Administrator session", body = Session),
        (status = 403, description = "Caller is not an administrator", body = serde_json::Value)
    ),
    tag = "Admin"
)]
fn admin_session_doc() {}
