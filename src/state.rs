use crate::application::ports::{EscolaRepository, StorageAdapter, TurmaRepository};
use crate::application::services::{OfflineService, OfflineStore};
use crate::application::stores::{EscolaStore, TurmaStore};
use crate::infrastructure::api::{ApiClient, EscolaApiRepository, TurmaApiRepository};
use crate::infrastructure::network::WatchNetworkMonitor;
use crate::infrastructure::storage::SqliteStorage;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Composition root. Everything is constructed and injected here; no
/// module holds global state.
pub struct AppState {
    pub config: AppConfig,
    pub network: Arc<WatchNetworkMonitor>,
    pub offline: Arc<OfflineService>,
    pub escola_store: Arc<EscolaStore>,
    pub turma_store: Arc<TurmaStore>,
    watcher: JoinHandle<()>,
}

impl AppState {
    /// Wires the app against the persistent SQLite store from `config`.
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        let storage = SqliteStorage::connect(
            &config.storage.database_url,
            &config.storage.namespace,
        )
        .await?;
        Self::with_storage(config, Arc::new(storage)).await
    }

    /// Wires the app over an already-built storage adapter. Tests pass
    /// an in-memory one here.
    pub async fn with_storage(
        config: AppConfig,
        storage: Arc<dyn StorageAdapter>,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Internal)?;

        let client = ApiClient::new(&config.api)?;
        let escola_repo: Arc<dyn EscolaRepository> =
            Arc::new(EscolaApiRepository::new(client.clone()));
        let turma_repo: Arc<dyn TurmaRepository> =
            Arc::new(TurmaApiRepository::new(client));

        let network = Arc::new(WatchNetworkMonitor::new(true));
        let offline = Arc::new(OfflineService::new(
            OfflineStore::new(storage),
            escola_repo.clone(),
            turma_repo.clone(),
            network.as_ref(),
            config.sync.clone(),
        ));
        offline.load_from_cache().await;
        let watcher = offline.spawn_connectivity_watcher();

        let escola_store = Arc::new(EscolaStore::new(escola_repo, offline.clone()));
        let turma_store = Arc::new(TurmaStore::new(turma_repo, offline.clone()));

        info!(base_url = %config.api.base_url, "Application state initialized");
        Ok(Self {
            config,
            network,
            offline,
            escola_store,
            turma_store,
            watcher,
        })
    }

    pub fn set_online(&self, online: bool) {
        self.network.set_online(online);
    }

    /// Stops the background connectivity watcher.
    pub fn shutdown(&self) {
        self.watcher.abort();
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
