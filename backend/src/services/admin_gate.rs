//! Fail-closed check for administrative access.

use crate::{
    models::{session::Session, user::AdminRoles},
    services::session::SessionOracle,
    types::RequestContext,
};

/// Returns `true` only when the oracle resolves a session whose role is in
/// `admin_roles`. Lookup failures are logged and treated as "not admin".
pub async fn is_admin_request(
    oracle: &dyn SessionOracle,
    admin_roles: &AdminRoles,
    ctx: &RequestContext,
) -> bool {
    match oracle.get_session(&ctx.headers).await {
        Ok(Some(session)) => has_admin_role(&session, admin_roles),
        Ok(None) => false,
        Err(err) => {
            tracing::warn!(
                request_id = ctx.request_id(),
                error = %err,
                "Session lookup failed, denying admin access"
            );
            false
        }
    }
}

pub fn has_admin_role(session: &Session, admin_roles: &AdminRoles) -> bool {
    session
        .role()
        .is_some_and(|role| admin_roles.contains(role))
}
