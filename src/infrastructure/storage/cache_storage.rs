use crate::application::ports::StorageAdapter;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    // Unix millis; entries at or past this instant read as absent.
    expiry: i64,
}

/// TTL decorator over any `StorageAdapter`.
///
/// Values are wrapped with an expiry timestamp on write and evicted
/// lazily on read. A value written by something else (no wrapper) reads
/// as absent rather than erroring.
pub struct CacheStorage {
    inner: Arc<dyn StorageAdapter>,
    default_ttl: Duration,
}

impl CacheStorage {
    pub fn new(inner: Arc<dyn StorageAdapter>, default_ttl: Duration) -> Self {
        Self { inner, default_ttl }
    }

    pub async fn set_item_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> Result<(), AppError> {
        let entry = CacheEntry {
            value,
            expiry: Utc::now().timestamp_millis() + ttl.as_millis() as i64,
        };
        self.inner.set_item(key, serde_json::to_string(&entry)?).await
    }
}

#[async_trait]
impl StorageAdapter for CacheStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let Some(raw) = self.inner.get_item(key).await? else {
            return Ok(None);
        };
        let Ok(entry) = serde_json::from_str::<CacheEntry>(&raw) else {
            debug!(key, "Unwrapped cache value, treating as absent");
            return Ok(None);
        };
        if entry.expiry <= Utc::now().timestamp_millis() {
            debug!(key, "Cache entry expired, evicting");
            self.inner.remove_item(key).await?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        self.set_item_with_ttl(key, value, self.default_ttl).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.inner.remove_item(key).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.inner.clear().await
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
        self.inner.get_all_keys().await
    }
}
