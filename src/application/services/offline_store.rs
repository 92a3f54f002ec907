use crate::application::ports::StorageAdapter;
use crate::domain::entities::{Escola, PendingAction, Turma};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub const KEY_ESCOLAS: &str = "escolas";
pub const KEY_TURMAS: &str = "turmas";
pub const KEY_LAST_SYNC: &str = "ultima_sincronizacao";
pub const KEY_PENDING_ACTIONS: &str = "acoes_pendentes";

/// Domain-level façade over a storage adapter: the cached school and
/// class snapshots, the last-sync timestamp, and the pending-action
/// queue, each under its own key in the adapter's namespace.
pub struct OfflineStore {
    storage: Arc<dyn StorageAdapter>,
}

impl OfflineStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    /// Persists the school snapshot and stamps a fresh last-sync time.
    pub async fn save_escolas(&self, escolas: &[Escola]) -> Result<(), AppError> {
        self.set_json(KEY_ESCOLAS, &escolas).await?;
        self.set_json(KEY_LAST_SYNC, &Utc::now()).await
    }

    pub async fn load_escolas(&self) -> Result<Option<Vec<Escola>>, AppError> {
        self.get_json(KEY_ESCOLAS).await
    }

    pub async fn save_turmas(&self, turmas: &[Turma]) -> Result<(), AppError> {
        self.set_json(KEY_TURMAS, &turmas).await
    }

    pub async fn load_turmas(&self) -> Result<Option<Vec<Turma>>, AppError> {
        self.get_json(KEY_TURMAS).await
    }

    pub async fn last_sync(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        self.get_json(KEY_LAST_SYNC).await
    }

    pub async fn save_pending(&self, actions: &[PendingAction]) -> Result<(), AppError> {
        self.set_json(KEY_PENDING_ACTIONS, &actions).await
    }

    pub async fn load_pending(&self) -> Result<Option<Vec<PendingAction>>, AppError> {
        self.get_json(KEY_PENDING_ACTIONS).await
    }

    /// Removes exactly the keys this façade owns; other tenants of the
    /// same adapter namespace are untouched.
    pub async fn clear(&self) -> Result<(), AppError> {
        for key in [KEY_ESCOLAS, KEY_TURMAS, KEY_LAST_SYNC, KEY_PENDING_ACTIONS] {
            self.storage.remove_item(key).await?;
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.storage.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        self.storage.set_item(key, serde_json::to_string(value)?).await
    }
}
