use crate::application::ports::StorageAdapter;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_storage (
    storage_key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)
"#;

/// SQLite-backed `StorageAdapter`.
///
/// Keys are namespaced on disk so several apps (or test instances) can
/// share one database file; callers only ever see the logical key. The
/// namespace may contain `_`, so prefix filters use `substr` instead of
/// `LIKE`.
pub struct SqliteStorage {
    pool: SqlitePool,
    namespace: String,
}

impl SqliteStorage {
    pub async fn connect(database_url: &str, namespace: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::with_pool(pool, namespace).await
    }

    /// A private in-memory database, for tests. Capped at one
    /// connection so the database outlives individual checkouts.
    pub async fn in_memory(namespace: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool, namespace).await
    }

    async fn with_pool(pool: SqlitePool, namespace: &str) -> Result<Self, AppError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        info!(namespace, "SQLite storage ready");
        Ok(Self {
            pool,
            namespace: namespace.to_string(),
        })
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM kv_storage WHERE storage_key = ?1",
        )
        .bind(self.storage_key(key))
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO kv_storage (storage_key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(storage_key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(self.storage_key(key))
        .bind(value)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_storage WHERE storage_key = ?1")
            .bind(self.storage_key(key))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_storage WHERE substr(storage_key, 1, ?1) = ?2")
            .bind(self.namespace.len() as i64)
            .bind(&self.namespace)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT storage_key FROM kv_storage WHERE substr(storage_key, 1, ?1) = ?2 \
             ORDER BY storage_key",
        )
        .bind(self.namespace.len() as i64)
        .bind(&self.namespace)
        .fetch_all(&self.pool)
        .await?;
        Ok(keys
            .into_iter()
            .map(|k| k[self.namespace.len()..].to_string())
            .collect())
    }
}
