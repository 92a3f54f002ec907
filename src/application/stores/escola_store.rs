use crate::application::ports::EscolaRepository;
use crate::application::services::OfflineService;
use crate::domain::entities::{
    ActionKind, EntityKind, Escola, EscolaInput, EscolaPatch, EscolaUpdatePayload,
};
use crate::domain::factories::EscolaFactory;
use crate::shared::collate::compare_nomes;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const ERRO_CARREGAR: &str = "Erro ao carregar escolas";
pub const ERRO_SALVAR: &str = "Erro ao salvar escola";
pub const ERRO_EXCLUIR: &str = "Erro ao excluir escola";

#[derive(Default)]
struct EscolaStoreState {
    escolas: Vec<Escola>,
    selecionada: Option<Escola>,
    carregando: bool,
    executando: bool,
    erro: Option<String>,
}

/// UI-facing state holder for schools.
///
/// Loads never bubble errors to the caller; they land in `erro` and the
/// previous (or cached) list stays visible. Mutations validate locally,
/// go straight to the API when online, and fall back to the pending
/// queue when not, applying the change optimistically either way.
pub struct EscolaStore {
    repository: Arc<dyn EscolaRepository>,
    offline: Arc<OfflineService>,
    factory: EscolaFactory,
    state: RwLock<EscolaStoreState>,
}

impl EscolaStore {
    pub fn new(repository: Arc<dyn EscolaRepository>, offline: Arc<OfflineService>) -> Self {
        Self {
            repository,
            offline,
            factory: EscolaFactory::new(),
            state: RwLock::new(EscolaStoreState::default()),
        }
    }

    pub async fn escolas(&self) -> Vec<Escola> {
        self.state.read().await.escolas.clone()
    }

    pub async fn selecionada(&self) -> Option<Escola> {
        self.state.read().await.selecionada.clone()
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

    /// Refreshes the list from the API, falling back to the offline
    /// cache when disconnected.
    pub async fn carregar_escolas(&self) {
        {
            let mut state = self.state.write().await;
            state.carregando = true;
            state.erro = None;
        }

        let resultado = if self.offline.is_online() {
            self.repository.get_all().await
        } else {
            debug!("Offline, serving escolas from cache");
            Ok(self.offline.escolas_cache().await)
        };

        let mut state = self.state.write().await;
        state.carregando = false;
        match resultado {
            Ok(mut escolas) => {
                escolas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
                if self.offline.is_online() {
                    drop(state);
                    self.offline.save_escolas_to_cache(escolas.clone()).await;
                    state = self.state.write().await;
                }
                state.escolas = escolas;
            }
            Err(err) if err.is_connection() => {
                warn!("Connection lost while loading escolas, using cache");
                let mut escolas = self.offline.escolas_cache().await;
                escolas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
                state.escolas = escolas;
                state.erro = Some(err.to_string());
            }
            Err(err) => {
                state.erro = Some(mensagem(&err, ERRO_CARREGAR));
            }
        }
    }

    /// Fetches one school with its classes and marks it selected.
    pub async fn selecionar_escola(&self, id: &str) {
        {
            let mut state = self.state.write().await;
            state.carregando = true;
            state.erro = None;
        }

        let resultado = if self.offline.is_online() {
            self.repository.get_with_classes(id).await
        } else {
            self.offline
                .escolas_cache()
                .await
                .into_iter()
                .find(|e| e.id == id)
                .ok_or_else(|| AppError::Api {
                    status: 404,
                    message: "Escola não encontrada".to_string(),
                })
        };

        let mut state = self.state.write().await;
        state.carregando = false;
        match resultado {
            Ok(escola) => state.selecionada = Some(escola),
            Err(err) => state.erro = Some(mensagem(&err, ERRO_CARREGAR)),
        }
    }

    pub async fn criar_escola(&self, input: &EscolaInput) -> Result<Escola, AppError> {
        let escola = self
            .mutacao(async {
                if self.offline.is_online() {
                    self.repository.create(input).await
                } else {
                    // Validate locally and queue for replay.
                    let escola = self.factory.create(input)?;
                    self.offline
                        .add_pending_action(
                            ActionKind::Create,
                            EntityKind::Escola,
                            serde_json::to_value(input)?,
                        )
                        .await?;
                    Ok(escola)
                }
            })
            .await?;

        self.commit_upsert(escola.clone()).await;
        Ok(escola)
    }

    pub async fn atualizar_escola(&self, id: &str, patch: &EscolaPatch) -> Result<Escola, AppError> {
        let existente = self
            .state
            .read()
            .await
            .escolas
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::Api {
                status: 404,
                message: "Escola não encontrada".to_string(),
            });
        let existente = match existente {
            Ok(e) => e,
            Err(err) => {
                self.state.write().await.erro = Some(mensagem(&err, ERRO_SALVAR));
                return Err(err);
            }
        };

        let atualizada = self.factory.create_for_update(&existente, patch);
        let dados = atualizada.to_input();

        let resultado = self
            .mutacao(async {
                if self.offline.is_online() {
                    self.repository.update(id, &dados).await
                } else {
                    let payload = EscolaUpdatePayload {
                        id: id.to_string(),
                        dados: dados.clone(),
                    };
                    self.offline
                        .add_pending_action(
                            ActionKind::Update,
                            EntityKind::Escola,
                            serde_json::to_value(&payload)?,
                        )
                        .await?;
                    Ok(atualizada.clone())
                }
            })
            .await?;

        self.commit_upsert(resultado.clone()).await;
        Ok(resultado)
    }

    pub async fn excluir_escola(&self, id: &str) -> Result<(), AppError> {
        self.mutacao(async {
            if self.offline.is_online() {
                self.repository.delete(id).await
            } else {
                self.offline
                    .add_pending_action(
                        ActionKind::Delete,
                        EntityKind::Escola,
                        serde_json::json!({ "id": id }),
                    )
                    .await?;
                Ok(())
            }
        })
        .await?;

        let mut state = self.state.write().await;
        state.escolas.retain(|e| e.id != id);
        if state.selecionada.as_ref().is_some_and(|e| e.id == id) {
            state.selecionada = None;
        }
        let escolas = state.escolas.clone();
        drop(state);
        self.offline.save_escolas_to_cache(escolas).await;
        Ok(())
    }

    /// Runs a mutation, tracking `executando` and mirroring failures
    /// into `erro` before re-raising them.
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

    async fn commit_upsert(&self, escola: Escola) {
        let mut state = self.state.write().await;
        match state.escolas.iter().position(|e| e.id == escola.id) {
            Some(idx) => state.escolas[idx] = escola.clone(),
            None => state.escolas.push(escola.clone()),
        }
        state.escolas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
        if state.selecionada.as_ref().is_some_and(|e| e.id == escola.id) {
            state.selecionada = Some(escola);
        }
        let escolas = state.escolas.clone();
        drop(state);
        self.offline.save_escolas_to_cache(escolas).await;
    }
}

/// User-facing message for a failed operation. API rejections carry
/// their own text, connectivity has a fixed one, everything else gets
/// the generic fallback.
pub(crate) fn mensagem(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Api { message, .. } => message.clone(),
        AppError::Validation(_) => err.to_string(),
        AppError::Connection => err.to_string(),
        _ => fallback.to_string(),
    }
}
