pub mod offline_service;
pub mod offline_store;

pub use offline_service::{OfflineService, SyncReport};
pub use offline_store::OfflineStore;
