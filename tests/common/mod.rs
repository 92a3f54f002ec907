use escolas_core::infrastructure::api::{ApiClient, EscolaApiRepository, TurmaApiRepository};
use escolas_core::infrastructure::mock_server::MockServer;
use escolas_core::AppConfig;

pub async fn iniciar_servidor() -> MockServer {
    MockServer::start().await.expect("mock server should start")
}

/// Config pointed at a running mock server, with a short timeout so
/// failure cases do not stall the suite.
pub fn config_para(base_url: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.api.base_url = base_url.to_string();
    cfg.api.timeout_ms = 2000;
    cfg
}

pub fn repositorios(base_url: &str) -> (EscolaApiRepository, TurmaApiRepository) {
    let cfg = config_para(base_url);
    let client = ApiClient::new(&cfg.api).expect("client should build");
    (
        EscolaApiRepository::new(client.clone()),
        TurmaApiRepository::new(client),
    )
}
