use escolas_core::infrastructure::mock_server::MockServer;
use std::net::SocketAddr;
use tracing::info;

/// Standalone mock API for local development. `ESCOLA_MOCK_PORT`
/// overrides the default port; Ctrl-C shuts down gracefully.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    escolas_core::init_logging();

    let port = std::env::var("ESCOLA_MOCK_PORT")
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(4000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let server = MockServer::start_at(addr).await?;
    info!(base_url = %server.base_url(), "Mock API ready");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.stop().await;
    Ok(())
}
