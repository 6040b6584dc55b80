use crate::error::Result;
use async_trait::async_trait;

pub mod file_storage;
pub mod memory_storage;
pub mod persistence;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use persistence::BoardPersistence;

/// Local key-value store holding serialized documents
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Reads the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
