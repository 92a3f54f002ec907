pub mod network;
pub mod repositories;
pub mod storage;

pub use network::NetworkMonitor;
pub use repositories::{EscolaRepository, TurmaRepository};
pub use storage::StorageAdapter;
