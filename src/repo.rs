mod storage;
mod subscriptions;

pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageError};
pub use subscriptions::{SubscriptionRepo, STORAGE_KEY};
