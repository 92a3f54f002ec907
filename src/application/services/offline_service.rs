use crate::application::ports::{EscolaRepository, NetworkMonitor, TurmaRepository};
use crate::application::services::offline_store::OfflineStore;
use crate::domain::entities::{
    ActionKind, DeletePayload, EntityKind, Escola, EscolaInput, EscolaUpdatePayload, PendingAction,
    Turma, TurmaInput, TurmaUpdatePayload,
};
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outcome of one replay pass over the pending-action queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced_count: u32,
    pub failed_count: u32,
    pub pending_count: u32,
}

#[derive(Default)]
struct OfflineState {
    escolas: Vec<Escola>,
    turmas: Vec<Turma>,
    last_sync: Option<DateTime<Utc>>,
    pending: Vec<PendingAction>,
}

/// Coordinates the offline cache and the pending-action queue.
///
/// Watches connectivity through a `NetworkMonitor`, persists every cache
/// and queue mutation before the in-memory copy becomes authoritative,
/// and replays queued mutations in strict enqueue order when the app
/// comes back online. Storage faults are logged and swallowed so the app
/// degrades to in-memory operation instead of crashing.
pub struct OfflineService {
    store: OfflineStore,
    escolas: Arc<dyn EscolaRepository>,
    turmas: Arc<dyn TurmaRepository>,
    online_rx: watch::Receiver<bool>,
    config: SyncConfig,
    state: RwLock<OfflineState>,
    // Serializes replay passes; replays must never interleave.
    sync_guard: Mutex<()>,
}

impl OfflineService {
    pub fn new(
        store: OfflineStore,
        escolas: Arc<dyn EscolaRepository>,
        turmas: Arc<dyn TurmaRepository>,
        network: &dyn NetworkMonitor,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            escolas,
            turmas,
            online_rx: network.subscribe(),
            config,
            state: RwLock::new(OfflineState::default()),
            sync_guard: Mutex::new(()),
        }
    }

    pub fn is_online(&self) -> bool {
        *self.online_rx.borrow()
    }

    pub async fn escolas_cache(&self) -> Vec<Escola> {
        self.state.read().await.escolas.clone()
    }

    pub async fn turmas_cache(&self) -> Vec<Turma> {
        self.state.read().await.turmas.clone()
    }

    pub async fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_sync
    }

    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending.len()
    }

    pub async fn pending_actions(&self) -> Vec<PendingAction> {
        self.state.read().await.pending.clone()
    }

    /// Loads the cached snapshots and the queue into memory. An empty
    /// cache is a normal startup state; read faults are logged and the
    /// corresponding slice stays empty. Safe to call repeatedly.
    pub async fn load_from_cache(&self) {
        let mut state = self.state.write().await;

        match self.store.load_escolas().await {
            Ok(Some(escolas)) => state.escolas = escolas,
            Ok(None) => {}
            Err(err) => warn!("Failed to load cached escolas: {err}"),
        }
        match self.store.load_turmas().await {
            Ok(Some(turmas)) => state.turmas = turmas,
            Ok(None) => {}
            Err(err) => warn!("Failed to load cached turmas: {err}"),
        }
        match self.store.last_sync().await {
            Ok(last_sync) => state.last_sync = last_sync,
            Err(err) => warn!("Failed to load last sync timestamp: {err}"),
        }
        match self.store.load_pending().await {
            Ok(Some(pending)) => state.pending = pending,
            Ok(None) => {}
            Err(err) => warn!("Failed to load pending actions: {err}"),
        }

        debug!(
            escolas = state.escolas.len(),
            turmas = state.turmas.len(),
            pending = state.pending.len(),
            "Offline cache loaded"
        );
    }

    /// Persists the school snapshot (plus a fresh last-sync timestamp)
    /// and commits it in memory.
    pub async fn save_escolas_to_cache(&self, escolas: Vec<Escola>) {
        let mut state = self.state.write().await;
        if let Err(err) = self.store.save_escolas(&escolas).await {
            warn!("Failed to persist escolas cache: {err}");
        }
        state.escolas = escolas;
        state.last_sync = Some(Utc::now());
    }

    pub async fn save_turmas_to_cache(&self, turmas: Vec<Turma>) {
        let mut state = self.state.write().await;
        if let Err(err) = self.store.save_turmas(&turmas).await {
            warn!("Failed to persist turmas cache: {err}");
        }
        state.turmas = turmas;
    }

    /// Appends a mutation to the queue, persisting before returning. The
    /// queue is bounded so an endless offline period cannot grow it
    /// without limit.
    pub async fn add_pending_action(
        &self,
        kind: ActionKind,
        entity: EntityKind,
        payload: serde_json::Value,
    ) -> Result<PendingAction, AppError> {
        let mut state = self.state.write().await;
        if state.pending.len() >= self.config.max_pending {
            return Err(AppError::Storage(format!(
                "Pending action queue is full ({} entries)",
                self.config.max_pending
            )));
        }

        let action = PendingAction::new(kind, entity, payload);
        state.pending.push(action.clone());
        if let Err(err) = self.store.save_pending(&state.pending).await {
            warn!("Failed to persist pending actions: {err}");
        }

        debug!(id = %action.id, ?kind, ?entity, "Pending action queued");
        Ok(action)
    }

    /// Replays the queue in enqueue order. No-op while offline or when
    /// the queue is empty. An action leaves the queue only on confirmed
    /// success, or once it exhausts its retry budget; a connection
    /// failure aborts the pass and leaves the rest untouched for the
    /// next Offline→Online transition.
    pub async fn sync_pending_actions(&self) -> SyncReport {
        let _guard = self.sync_guard.lock().await;

        if !self.is_online() {
            let pending = self.pending_count().await as u32;
            return SyncReport {
                pending_count: pending,
                ..SyncReport::default()
            };
        }

        let snapshot = self.pending_actions().await;
        if snapshot.is_empty() {
            return SyncReport::default();
        }

        info!(count = snapshot.len(), "Replaying pending actions");

        let mut synced: HashSet<String> = HashSet::new();
        let mut dropped: HashSet<String> = HashSet::new();
        let mut attempts: HashMap<String, u32> = HashMap::new();
        let mut failed_count = 0u32;

        for action in &snapshot {
            match self.replay(action).await {
                Ok(()) => {
                    debug!(id = %action.id, "Pending action replayed");
                    synced.insert(action.id.clone());
                }
                Err(AppError::Connection) => {
                    // Lost connectivity mid-pass; keep everything that is
                    // left, in order, for the next transition.
                    warn!(id = %action.id, "Connection lost during replay, aborting pass");
                    failed_count += 1;
                    break;
                }
                Err(AppError::Serialization(err)) => {
                    warn!(id = %action.id, "Dropping undecodable pending action: {err}");
                    dropped.insert(action.id.clone());
                    failed_count += 1;
                }
                Err(err) => {
                    let tried = action.attempts + 1;
                    if tried >= self.config.max_retries {
                        warn!(
                            id = %action.id,
                            attempts = tried,
                            "Dropping pending action after repeated failures: {err}"
                        );
                        dropped.insert(action.id.clone());
                    } else {
                        warn!(id = %action.id, attempts = tried, "Pending action failed: {err}");
                        attempts.insert(action.id.clone(), tried);
                    }
                    failed_count += 1;
                }
            }
        }

        // Reconcile against the live queue: actions enqueued during the
        // pass are preserved untouched.
        let mut state = self.state.write().await;
        state.pending.retain(|a| !synced.contains(&a.id) && !dropped.contains(&a.id));
        for action in &mut state.pending {
            if let Some(tried) = attempts.get(&action.id) {
                action.attempts = *tried;
            }
        }
        if let Err(err) = self.store.save_pending(&state.pending).await {
            warn!("Failed to persist pending actions: {err}");
        }

        SyncReport {
            synced_count: synced.len() as u32,
            failed_count,
            pending_count: state.pending.len() as u32,
        }
    }

    /// Empties the cached snapshots, the last-sync timestamp and the
    /// queue, both persisted and in memory. Idempotent.
    pub async fn clear_cache(&self) {
        let mut state = self.state.write().await;
        if let Err(err) = self.store.clear().await {
            warn!("Failed to clear offline cache: {err}");
        }
        *state = OfflineState::default();
    }

    /// Spawns the connectivity watcher: every Offline→Online edge kicks
    /// off a replay pass.
    pub fn spawn_connectivity_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        let mut rx = self.online_rx.clone();
        tokio::spawn(async move {
            let mut was_online = *rx.borrow();
            while rx.changed().await.is_ok() {
                let online = *rx.borrow();
                if online && !was_online {
                    info!("Back online, syncing pending actions");
                    let report = service.sync_pending_actions().await;
                    debug!(?report, "Replay pass finished");
                }
                was_online = online;
            }
        })
    }

    async fn replay(&self, action: &PendingAction) -> Result<(), AppError> {
        match (action.entity, action.kind) {
            (EntityKind::Escola, ActionKind::Create) => {
                let input: EscolaInput = serde_json::from_value(action.payload.clone())?;
                self.escolas.create(&input).await.map(drop)
            }
            (EntityKind::Escola, ActionKind::Update) => {
                let payload: EscolaUpdatePayload = serde_json::from_value(action.payload.clone())?;
                self.escolas.update(&payload.id, &payload.dados).await.map(drop)
            }
            (EntityKind::Escola, ActionKind::Delete) => {
                let payload: DeletePayload = serde_json::from_value(action.payload.clone())?;
                self.escolas.delete(&payload.id).await
            }
            (EntityKind::Turma, ActionKind::Create) => {
                let input: TurmaInput = serde_json::from_value(action.payload.clone())?;
                self.turmas.create(&input).await.map(drop)
            }
            (EntityKind::Turma, ActionKind::Update) => {
                let payload: TurmaUpdatePayload = serde_json::from_value(action.payload.clone())?;
                self.turmas.update(&payload.id, &payload.dados).await.map(drop)
            }
            (EntityKind::Turma, ActionKind::Delete) => {
                let payload: DeletePayload = serde_json::from_value(action.payload.clone())?;
                self.turmas.delete(&payload.id).await
            }
        }
    }
}
