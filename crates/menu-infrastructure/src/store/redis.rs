//! Redis-backed option store shared by every server instance

use async_trait::async_trait;
use deadpool_redis::redis::cmd;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use tracing::error;

use menu_core::error::DomainError;
use menu_core::repositories::OptionStore;
use menu_shared::config::RedisSettings;

pub struct RedisOptionStore {
    pool: Pool,
}

impl RedisOptionStore {
    /// Builds the pool. No connection is opened until the first command.
    pub fn new(settings: &RedisSettings) -> Result<Self, DomainError> {
        let mut config = Config::from_url(settings.url.as_str());
        config.pool = Some(PoolConfig::new(settings.max_connections as usize));
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DomainError::StoreError(format!("Redis pool: {}", e)))?;
        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis connection unavailable: {}", e);
            DomainError::StoreError(e.to_string())
        })
    }
}

fn store_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::StoreError(e.to_string())
}

#[async_trait]
impl OptionStore for RedisOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(value)
    }

    /// `MSET` applies all pairs atomically.
    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), DomainError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut command = cmd("MSET");
        for (key, value) in &entries {
            command.arg(key).arg(value);
        }

        let mut conn = self.connection().await?;
        let () = command.query_async(&mut conn).await.map_err(store_error)?;
        Ok(())
    }
}
