pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

mod state;

pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::AppState;

/// Installs the global tracing subscriber. `RUST_LOG` wins when set.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "escolas_core=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
