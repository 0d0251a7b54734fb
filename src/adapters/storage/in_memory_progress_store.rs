//! In-Memory Progress Store Adapter
//!
//! Keeps progress records in memory.
//! Useful for testing and for runs with persistence disabled.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::progress::{ProgressPatch, ProgressRecord};
use crate::ports::{ProgressStore, ProgressStoreError};

/// In-memory storage for progress records
#[derive(Debug, Clone)]
pub struct InMemoryProgressStore {
    records: Arc<RwLock<HashMap<UserId, ProgressRecord>>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a record directly (useful for tests)
    pub async fn insert(&self, user_id: UserId, record: ProgressRecord) {
        self.records.write().await.insert(user_id, record);
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for InMemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, ProgressStoreError> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn save(&self, user_id: &UserId, patch: &ProgressPatch) -> Result<(), ProgressStoreError> {
        let mut records = self.records.write().await;
        records
            .entry(user_id.clone())
            .and_modify(|record| record.apply(patch))
            .or_insert_with(|| ProgressRecord::from_patch(patch));
        Ok(())
    }
}
