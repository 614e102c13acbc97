use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{SubscriptionRecord, SubscriptionStats};

use super::{KeyValueStore, StorageError};

/// Slot holding the JSON array of subscription records
pub const STORAGE_KEY: &str = "commuter_subscriptions";

/// Advisory log of subscription attempts.
/// Storage failures are logged and never returned to callers.
#[derive(Clone)]
pub struct SubscriptionRepo {
    store: Arc<dyn KeyValueStore>,
}

impl SubscriptionRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Store subscription record", skip(self))]
    pub async fn append(&self, record: SubscriptionRecord) {
        if let Err(e) = self.try_append(record).await {
            tracing::warn!("Could not store subscription locally: {}", e);
        }
    }

    /// All stored records in insertion order, empty if the slot is missing or unreadable
    #[tracing::instrument(name = "Read stored subscriptions", skip(self))]
    pub async fn read_all(&self) -> Vec<SubscriptionRecord> {
        match self.try_read_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not retrieve stored subscriptions: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn compute_stats(&self) -> SubscriptionStats {
        self.compute_stats_at(Utc::now()).await
    }

    pub async fn compute_stats_at(&self, now: DateTime<Utc>) -> SubscriptionStats {
        let records = self.read_all().await;
        SubscriptionStats::compute(&records, now)
    }

    // NOTE: read-then-write, concurrent appends can drop a record
    async fn try_append(&self, record: SubscriptionRecord) -> Result<(), StorageError> {
        // A corrupt log is replaced; a slot that cannot be read is left alone
        let mut records = match self.try_read_all().await {
            Ok(records) => records,
            Err(e @ StorageError::Decode(_)) => {
                tracing::warn!("Discarding unreadable subscription log: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        records.push(record);

        let bytes = serde_json::to_vec(&records).map_err(StorageError::Encode)?;
        self.store.write(STORAGE_KEY, bytes).await
    }

    async fn try_read_all(&self) -> Result<Vec<SubscriptionRecord>, StorageError> {
        match self.store.read(STORAGE_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(StorageError::Decode),
            None => Ok(Vec::new()),
        }
    }
}
