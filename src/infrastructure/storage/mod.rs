pub mod cache_storage;
pub mod memory_storage;
pub mod sqlite_storage;

pub use cache_storage::CacheStorage;
pub use memory_storage::MemoryStorage;
pub use sqlite_storage::SqliteStorage;
