//! Session state resolved from a request by the session oracle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
/// Identity of the account bound to a session.
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// `None` when the credential carried no role or one outside the known set.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn role(&self) -> Option<UserRole> {
        self.user.role
    }
}
