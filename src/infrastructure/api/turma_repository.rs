use crate::application::ports::TurmaRepository;
use crate::domain::entities::{Turma, TurmaInput, TurmaPatch};
use crate::infrastructure::api::client::ApiClient;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// `TurmaRepository` over the REST API. Updates send only the changed
/// fields; the server merges them over the stored record.
pub struct TurmaApiRepository {
    client: ApiClient,
}

impl TurmaApiRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TurmaRepository for TurmaApiRepository {
    async fn get_all(&self) -> Result<Vec<Turma>, AppError> {
        self.client.get("/classes").await
    }

    async fn get_by_id(&self, id: &str) -> Result<Turma, AppError> {
        self.client.get(&format!("/classes/{id}")).await
    }

    async fn get_by_school_id(&self, school_id: &str) -> Result<Vec<Turma>, AppError> {
        self.client.get(&format!("/schools/{school_id}/classes")).await
    }

    async fn create(&self, input: &TurmaInput) -> Result<Turma, AppError> {
        self.client.post("/classes", input).await
    }

    async fn update(&self, id: &str, patch: &TurmaPatch) -> Result<Turma, AppError> {
        self.client.put(&format!("/classes/{id}"), patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client.delete(&format!("/classes/{id}")).await
    }
}
