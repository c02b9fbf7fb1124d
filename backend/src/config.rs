use anyhow::{anyhow, Context};
use std::{env, net::SocketAddr};

use crate::{
    models::user::AdminRoles,
    utils::cookies::{CookieOptions, SameSite},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub admin_roles: AdminRoles,
    pub redis_url: Option<String>,
    pub redis_pool_size: u32,
    pub redis_connect_timeout: u64,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// development defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .context("Invalid BIND_ADDR value")?;

        let jwt_secret = lookup("JWT_SECRET")
            .unwrap_or_else(|| "your-secret-key-change-this-in-production".to_string());

        let jwt_expiration_hours = lookup("JWT_EXPIRATION_HOURS")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(1);

        let admin_roles = match lookup("ADMIN_ROLES") {
            Some(raw) => AdminRoles::parse_list(&raw).context("Invalid ADMIN_ROLES value")?,
            None => AdminRoles::default(),
        };

        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        let redis_pool_size = lookup("REDIS_POOL_SIZE")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(10);

        let redis_connect_timeout = lookup("REDIS_CONNECT_TIMEOUT")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(5);

        let cookie_secure = lookup("COOKIE_SECURE")
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cookie_same_site = match lookup("COOKIE_SAME_SITE") {
            Some(raw) => raw.parse::<SameSite>()?,
            None => SameSite::Lax,
        };
        if cookie_same_site == SameSite::None && !cookie_secure {
            return Err(anyhow!("COOKIE_SAME_SITE=None requires COOKIE_SECURE=true"));
        }

        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Config {
            bind_addr,
            jwt_secret,
            jwt_expiration_hours,
            admin_roles,
            redis_url,
            redis_pool_size,
            redis_connect_timeout,
            cookie_secure,
            cookie_same_site,
            cors_allow_origins,
        })
    }

    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
        }
    }
}
