use crate::application::ports::EscolaRepository;
use crate::domain::entities::{Escola, EscolaInput};
use crate::infrastructure::api::client::ApiClient;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// `EscolaRepository` over the REST API.
pub struct EscolaApiRepository {
    client: ApiClient,
}

impl EscolaApiRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EscolaRepository for EscolaApiRepository {
    async fn get_all(&self) -> Result<Vec<Escola>, AppError> {
        self.client.get("/schools").await
    }

    async fn get_by_id(&self, id: &str) -> Result<Escola, AppError> {
        self.client.get(&format!("/schools/{id}")).await
    }

    async fn create(&self, input: &EscolaInput) -> Result<Escola, AppError> {
        self.client.post("/schools", input).await
    }

    async fn update(&self, id: &str, input: &EscolaInput) -> Result<Escola, AppError> {
        self.client.put(&format!("/schools/{id}"), input).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client.delete(&format!("/schools/{id}")).await
    }
}
