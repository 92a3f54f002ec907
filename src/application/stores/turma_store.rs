use crate::application::ports::TurmaRepository;
use crate::application::services::OfflineService;
use crate::application::stores::escola_store::mensagem;
use crate::domain::entities::{
    ActionKind, EntityKind, Turma, TurmaInput, TurmaPatch, TurmaUpdatePayload,
};
use crate::domain::factories::TurmaFactory;
use crate::shared::collate::compare_nomes;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const ERRO_CARREGAR: &str = "Erro ao carregar turmas";
pub const ERRO_SALVAR: &str = "Erro ao salvar turma";

#[derive(Default)]
struct TurmaStoreState {
    turmas: Vec<Turma>,
    carregando: bool,
    executando: bool,
    erro: Option<String>,
}

/// UI-facing state holder for classes. Same contract as `EscolaStore`:
/// loads swallow failures into `erro`, mutations re-raise them.
pub struct TurmaStore {
    repository: Arc<dyn TurmaRepository>,
    offline: Arc<OfflineService>,
    factory: TurmaFactory,
    state: RwLock<TurmaStoreState>,
}

impl TurmaStore {
    pub fn new(repository: Arc<dyn TurmaRepository>, offline: Arc<OfflineService>) -> Self {
        Self {
            repository,
            offline,
            factory: TurmaFactory::new(),
            state: RwLock::new(TurmaStoreState::default()),
        }
    }

    pub async fn turmas(&self) -> Vec<Turma> {
        self.state.read().await.turmas.clone()
    }

    pub async fn carregando(&self) -> bool {
        self.state.read().await.carregando
    }

    pub async fn executando(&self) -> bool {
        self.state.read().await.executando
    }

    pub async fn erro(&self) -> Option<String> {
        self.state.read().await.erro.clone()
    }

    pub async fn limpar_erro(&self) {
        self.state.write().await.erro = None;
    }

    /// Refreshes every class, API first, cache when offline.
    pub async fn carregar_turmas(&self) {
        self.carregar(None).await
    }

    /// Refreshes the classes of one school. The offline cache always
    /// holds the full list, so the school filter is applied locally.
    pub async fn carregar_turmas_da_escola(&self, escola_id: &str) {
        self.carregar(Some(escola_id)).await
    }

    async fn carregar(&self, escola_id: Option<&str>) {
        {
            let mut state = self.state.write().await;
            state.carregando = true;
            state.erro = None;
        }

        let resultado = if self.offline.is_online() {
            match escola_id {
                Some(id) => self.repository.get_by_school_id(id).await,
                None => self.repository.get_all().await,
            }
        } else {
            debug!("Offline, serving turmas from cache");
            let cache = self.offline.turmas_cache().await;
            Ok(match escola_id {
                Some(id) => cache.into_iter().filter(|t| t.escola_id == id).collect(),
                None => cache,
            })
        };

        let mut state = self.state.write().await;
        state.carregando = false;
        match resultado {
            Ok(mut turmas) => {
                turmas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
                // Only the unfiltered list is a full snapshot worth caching.
                if escola_id.is_none() && self.offline.is_online() {
                    drop(state);
                    self.offline.save_turmas_to_cache(turmas.clone()).await;
                    state = self.state.write().await;
                }
                state.turmas = turmas;
            }
            Err(err) if err.is_connection() => {
                warn!("Connection lost while loading turmas, using cache");
                let cache = self.offline.turmas_cache().await;
                let mut turmas: Vec<Turma> = match escola_id {
                    Some(id) => cache.into_iter().filter(|t| t.escola_id == id).collect(),
                    None => cache,
                };
                turmas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
                state.turmas = turmas;
                state.erro = Some(err.to_string());
            }
            Err(err) => {
                state.erro = Some(mensagem(&err, ERRO_CARREGAR));
            }
        }
    }

    pub async fn criar_turma(&self, input: &TurmaInput) -> Result<Turma, AppError> {
        let turma = self
            .mutacao(async {
                if self.offline.is_online() {
                    self.repository.create(input).await
                } else {
                    let turma = self.factory.create(input)?;
                    self.offline
                        .add_pending_action(
                            ActionKind::Create,
                            EntityKind::Turma,
                            serde_json::to_value(input)?,
                        )
                        .await?;
                    Ok(turma)
                }
            })
            .await?;

        self.commit_upsert(turma.clone()).await;
        Ok(turma)
    }

    pub async fn atualizar_turma(&self, id: &str, patch: &TurmaPatch) -> Result<Turma, AppError> {
        let turma = self
            .mutacao(async {
                if self.offline.is_online() {
                    self.repository.update(id, patch).await
                } else {
                    let existente = self
                        .state
                        .read()
                        .await
                        .turmas
                        .iter()
                        .find(|t| t.id == id)
                        .cloned()
                        .ok_or_else(|| AppError::Api {
                            status: 404,
                            message: "Turma não encontrada".to_string(),
                        })?;
                    let payload = TurmaUpdatePayload {
                        id: id.to_string(),
                        dados: patch.clone(),
                    };
                    self.offline
                        .add_pending_action(
                            ActionKind::Update,
                            EntityKind::Turma,
                            serde_json::to_value(&payload)?,
                        )
                        .await?;
                    Ok(self.factory.create_for_update(&existente, patch))
                }
            })
            .await?;

        self.commit_upsert(turma.clone()).await;
        Ok(turma)
    }

    pub async fn excluir_turma(&self, id: &str) -> Result<(), AppError> {
        self.mutacao(async {
            if self.offline.is_online() {
                self.repository.delete(id).await
            } else {
                self.offline
                    .add_pending_action(
                        ActionKind::Delete,
                        EntityKind::Turma,
                        serde_json::json!({ "id": id }),
                    )
                    .await?;
                Ok(())
            }
        })
        .await?;

        let mut state = self.state.write().await;
        state.turmas.retain(|t| t.id != id);
        let turmas = state.turmas.clone();
        drop(state);
        self.offline.save_turmas_to_cache(turmas).await;
        Ok(())
    }

    async fn mutacao<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        {
            let mut state = self.state.write().await;
            state.executando = true;
            state.erro = None;
        }
        let resultado = fut.await;
        let mut state = self.state.write().await;
        state.executando = false;
        if let Err(err) = &resultado {
            state.erro = Some(mensagem(err, ERRO_SALVAR));
        }
        resultado
    }

    async fn commit_upsert(&self, turma: Turma) {
        let mut state = self.state.write().await;
        match state.turmas.iter().position(|t| t.id == turma.id) {
            Some(idx) => state.turmas[idx] = turma,
            None => state.turmas.push(turma),
        }
        state.turmas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
        let turmas = state.turmas.clone();
        drop(state);
        self.offline.save_turmas_to_cache(turmas).await;
    }
}
