//! Progress Store Port - Interface for persisting assessment progress.
//!
//! Records are keyed by user and updated with partial patches, so a store
//! only ever overwrites the fields a transition changed.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::progress::{ProgressPatch, ProgressRecord};

/// Errors that can occur during progress storage operations
#[derive(Debug, thiserror::Error)]
pub enum ProgressStoreError {
    #[error("Failed to serialize progress: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize progress: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading and saving per-user progress
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Load the stored record for a user
    ///
    /// # Returns
    /// `None` if the user has no stored progress
    async fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, ProgressStoreError>;

    /// Merge a patch into the user's record, creating it if absent
    ///
    /// Fields absent from the patch keep their stored values.
    async fn save(&self, user_id: &UserId, patch: &ProgressPatch) -> Result<(), ProgressStoreError>;
}
