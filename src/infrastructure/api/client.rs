use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct ErroBody {
    erro: String,
}

/// Thin JSON client over reqwest. Every request carries the configured
/// timeout; timeouts and transport failures surface as
/// `AppError::Connection`, rejections as `AppError::Api` with the
/// server's `{ "erro": ... }` message when one is present.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| AppError::Internal(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, AppError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, AppError> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(path))).await.map(drop)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Runs the request and returns the raw success body. Non-2xx
    /// responses become `Api` errors with the server's message.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, AppError> {
        let response = request.send().await.map_err(|err| {
            warn!("Request failed before a response arrived: {err}");
            AppError::Connection
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|err| {
            warn!("Connection dropped while reading the response: {err}");
            AppError::Connection
        })?;

        debug!(%status, bytes = body.len(), "API response");
        if !status.is_success() {
            let message = serde_json::from_str::<ErroBody>(&body)
                .map(|b| b.erro)
                .unwrap_or_else(|_| "Erro na requisição".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}
