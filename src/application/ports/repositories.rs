use crate::domain::entities::{Escola, EscolaInput, Turma, TurmaInput, TurmaPatch};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// CRUD over the schools REST collection.
#[async_trait]
pub trait EscolaRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Escola>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Escola, AppError>;
    /// The detail payload already embeds its Turmas, so this is the same
    /// call as `get_by_id`; kept as a separate operation for intent.
    async fn get_with_classes(&self, id: &str) -> Result<Escola, AppError> {
        self.get_by_id(id).await
    }
    async fn create(&self, input: &EscolaInput) -> Result<Escola, AppError>;
    async fn update(&self, id: &str, input: &EscolaInput) -> Result<Escola, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// CRUD over the classes REST collection.
#[async_trait]
pub trait TurmaRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Turma>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Turma, AppError>;
    /// Uses the nested listing endpoint rather than filtering client-side.
    async fn get_by_school_id(&self, school_id: &str) -> Result<Vec<Turma>, AppError>;
    async fn create(&self, input: &TurmaInput) -> Result<Turma, AppError>;
    async fn update(&self, id: &str, patch: &TurmaPatch) -> Result<Turma, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
