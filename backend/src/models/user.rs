//! Roles carried by storefront sessions and the administrative role set.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
/// Roles a storefront account can hold.
pub enum UserRole {
    /// Shopper account with access to their own orders and wishlist.
    Customer,
    /// Store staff, e.g. fulfilment or content editors.
    Staff,
    /// Administrator of the admin console.
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Customer, UserRole::Staff, UserRole::Admin];

    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Staff => "staff",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    // Legacy tokens carry "ADMIN" / "Admin"; matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(trimmed.to_string()))
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::unknown_variant(&s, &["customer", "staff", "admin"])
        })
    }
}

/// Roles that pass the admin gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoles(HashSet<UserRole>);

impl AdminRoles {
    pub fn new(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// Parses a comma-separated list such as `admin,staff`.
    pub fn parse_list(raw: &str) -> anyhow::Result<Self> {
        let roles = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(UserRole::from_str)
            .collect::<Result<HashSet<_>, _>>()?;
        if roles.is_empty() {
            anyhow::bail!("at least one administrative role must be configured");
        }
        Ok(Self(roles))
    }

    pub fn contains(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRole> {
        self.0.iter()
    }
}

impl Default for AdminRoles {
    fn default() -> Self {
        Self::new([UserRole::Admin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_tolerates_legacy_casings() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("Customer".parse::<UserRole>(), Ok(UserRole::Customer));
        assert_eq!(
            "vendor".parse::<UserRole>(),
            Err(UnknownRole("vendor".to_string()))
        );
    }

    #[test]
    fn role_serializes_as_snake_case() {
        let json = serde_json::to_value(UserRole::Staff).expect("serialize role");
        assert_eq!(json, "staff");
        let role: UserRole = serde_json::from_value(serde_json::json!("ADMIN")).expect("role");
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn default_admin_roles_only_admit_admin() {
        let roles = AdminRoles::default();
        assert!(roles.contains(UserRole::Admin));
        assert!(!roles.contains(UserRole::Staff));
        assert!(!roles.contains(UserRole::Customer));
    }

    #[test]
    fn parse_list_accepts_multiple_roles() {
        let roles = AdminRoles::parse_list(" admin , staff ").expect("parse roles");
        assert!(roles.contains(UserRole::Admin));
        assert!(roles.contains(UserRole::Staff));
        assert!(!roles.contains(UserRole::Customer));
    }

    #[test]
    fn parse_list_rejects_unknown_and_empty() {
        assert!(AdminRoles::parse_list("admin,root").is_err());
        assert!(AdminRoles::parse_list(" , ").is_err());
    }
}
