pub mod routes;
pub mod state;

use crate::shared::error::AppError;
use state::MockState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Explicitly owned in-process REST server with the app's wire
/// contract and seed data. Binds an ephemeral port by default so test
/// instances never collide; `stop` drains in-flight requests before
/// returning.
pub struct MockServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts a seeded server on an ephemeral localhost port.
    pub async fn start() -> Result<Self, AppError> {
        Self::start_at(SocketAddr::from(([127, 0, 0, 1], 0))).await
    }

    pub async fn start_at(addr: SocketAddr) -> Result<Self, AppError> {
        Self::start_with(addr, MockState::seeded()).await
    }

    pub async fn start_with(addr: SocketAddr, state: MockState) -> Result<Self, AppError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| AppError::Internal(format!("Failed to bind {addr}: {err}")))?;
        let addr = listener
            .local_addr()
            .map_err(|err| AppError::Internal(format!("Failed to read local addr: {err}")))?;

        let app = routes::router(Arc::new(RwLock::new(state)));
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(err) = server.await {
                error!("Mock server failed: {err}");
            }
        });

        info!(%addr, "Mock server listening");
        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL including the `/api` prefix, ready for `ApiConfig`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Graceful shutdown; waits for the accept loop to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
        info!("Mock server stopped");
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
