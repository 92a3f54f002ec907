use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_url: String,
    /// Key prefix isolating this app's entries in the shared store.
    pub namespace: String,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Upper bound on queued offline mutations.
    pub max_pending: usize,
    /// Replay attempts before a pending action is dropped.
    pub max_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:4000/api".to_string(),
                timeout_ms: 5000,
            },
            storage: StorageConfig {
                database_url: "sqlite:escola_app.db?mode=rwc".to_string(),
                namespace: "escola_app_".to_string(),
                cache_ttl_secs: 300, // 5 minutes
            },
            sync: SyncConfig {
                max_pending: 200,
                max_retries: 5,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("ESCOLA_API_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.api.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_API_TIMEOUT_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.api.timeout_ms = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_DB_URL") {
            if !v.trim().is_empty() {
                cfg.storage.database_url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_STORAGE_NAMESPACE") {
            if !v.trim().is_empty() {
                cfg.storage.namespace = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_CACHE_TTL_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.storage.cache_ttl_secs = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_SYNC_MAX_PENDING") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.max_pending = value.max(1) as usize;
            }
        }
        if let Ok(v) = std::env::var("ESCOLA_SYNC_MAX_RETRIES") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.max_retries = value as u32;
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("Api base_url must not be empty".to_string());
        }
        if self.api.timeout_ms == 0 {
            return Err("Api timeout_ms must be greater than 0".to_string());
        }
        if self.storage.namespace.trim().is_empty() {
            return Err("Storage namespace must not be empty".to_string());
        }
        if self.storage.cache_ttl_secs == 0 {
            return Err("Storage cache_ttl_secs must be greater than 0".to_string());
        }
        if self.sync.max_pending == 0 {
            return Err("Sync max_pending must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_namespace() {
        let mut cfg = AppConfig::default();
        cfg.storage.namespace = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = AppConfig::default();
        cfg.api.timeout_ms = 0;
        assert!(cfg.validate().is_err());
    }
}
