//! Storage for terminated session tokens, keyed by JWT id.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use anyhow::Context;
use async_trait::async_trait;
use bb8::Pool;
use bb8_redis::{
    redis::{self, AsyncCommands},
    RedisConnectionManager,
};
use tokio::sync::RwLock;

use crate::config::Config;

pub type RedisPool = Pool<RedisConnectionManager>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks `jti` as terminated for `ttl_seconds`, normally the token's
    /// remaining lifetime. Returns `false` when `jti` was already terminated;
    /// check and insert happen as one step.
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> anyhow::Result<bool>;
    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool>;
}

/// Process-local store used when no Redis URL is configured.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> anyhow::Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, expires_at| *expires_at > now);
        if entries.contains_key(jti) {
            return Ok(false);
        }
        entries.insert(jti.to_string(), now + Duration::from_secs(ttl_seconds));
        Ok(true)
    }

    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(jti)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}

pub struct RedisRevocationStore {
    pool: RedisPool,
}

impl RedisRevocationStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Builds the pool from `REDIS_URL` and pings the server once, so a bad
    /// URL fails at startup rather than on the first logout.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let url = config
            .redis_url
            .as_deref()
            .context("REDIS_URL is not set")?;
        let manager = RedisConnectionManager::new(url)
            .with_context(|| format!("invalid REDIS_URL {url}"))?;
        let pool = Pool::builder()
            .max_size(config.redis_pool_size)
            .connection_timeout(Duration::from_secs(config.redis_connect_timeout))
            .build(manager)
            .await
            .context("failed to build redis pool")?;

        {
            let mut conn = pool
                .get()
                .await
                .context("failed to reach redis revocation store")?;
            redis::cmd("PING")
                .query_async::<_, String>(&mut *conn)
                .await
                .context("redis PING failed")?;
        }

        tracing::info!(
            pool_size = config.redis_pool_size,
            "Connected to redis revocation store"
        );
        Ok(Self::new(pool))
    }

    fn revoked_key(jti: &str) -> String {
        format!("revoked_token:{}", jti)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    #[tracing::instrument(name = "redis_revoke_token", level = "debug", skip(self))]
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> anyhow::Result<bool> {
        let mut conn = self.pool.get().await?;
        let key = Self::revoked_key(jti);
        // SET NX replies nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds.max(1))
            .query_async(&mut *conn)
            .await?;
        Ok(reply.is_some())
    }

    #[tracing::instrument(name = "redis_is_token_revoked", level = "debug", skip(self))]
    async fn is_revoked(&self, jti: &str) -> anyhow::Result<bool> {
        let mut conn = self.pool.get().await?;
        let key = Self::revoked_key(jti);
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn in_memory_store_tracks_revoked_ids() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.is_revoked("jti-1").await.expect("lookup"));

        assert!(store.revoke("jti-1", 60).await.expect("revoke"));
        assert!(store.is_revoked("jti-1").await.expect("lookup"));
        assert!(!store.is_revoked("jti-2").await.expect("lookup"));
    }

    #[tokio::test]
    async fn in_memory_store_revokes_each_id_once() {
        let store = InMemoryRevocationStore::new();
        assert!(store.revoke("jti-1", 60).await.expect("revoke"));
        assert!(!store.revoke("jti-1", 60).await.expect("revoke again"));
    }

    #[tokio::test]
    async fn in_memory_store_concurrent_revokes_admit_one() {
        let store = Arc::new(InMemoryRevocationStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.revoke("jti-race", 60).await })
            })
            .collect();

        let mut newly_revoked = 0;
        for handle in handles {
            if handle.await.expect("join").expect("revoke") {
                newly_revoked += 1;
            }
        }
        assert_eq!(newly_revoked, 1);
    }

    #[tokio::test]
    async fn in_memory_store_forgets_expired_entries() {
        let store = InMemoryRevocationStore::new();
        store.revoke("short-lived", 0).await.expect("revoke");
        assert!(!store.is_revoked("short-lived").await.expect("lookup"));

        store.revoke("jti-3", 60).await.expect("revoke");
        let entries = store.entries.read().await;
        assert!(!entries.contains_key("short-lived"));
        assert!(entries.contains_key("jti-3"));
    }

    #[tokio::test]
    async fn in_memory_store_revokes_again_after_expiry() {
        let store = InMemoryRevocationStore::new();
        assert!(store.revoke("jti-4", 0).await.expect("revoke"));
        assert!(store.revoke("jti-4", 60).await.expect("revoke after expiry"));
    }
}
