use crate::shared::error::AppError;
use async_trait::async_trait;

/// Uniform capability over heterogeneous local storage backends.
///
/// Values are JSON-encoded strings; callers own the encoding. A missing
/// key is `Ok(None)`, never an error; `AppError::Storage` is reserved
/// for real I/O faults. `clear` and `get_all_keys` only ever touch the
/// adapter's own namespace, and keys are reported without the prefix.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError>;
    async fn remove_item(&self, key: &str) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
    async fn get_all_keys(&self) -> Result<Vec<String>, AppError>;
}
