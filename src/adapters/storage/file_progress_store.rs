//! File-based Progress Store Adapter
//!
//! Stores one YAML file per user under a base directory. File names are
//! the hex-encoded user id, so any id maps to a distinct, safe file name.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::domain::progress::{ProgressPatch, ProgressRecord};
use crate::ports::{ProgressStore, ProgressStoreError};

/// File-based storage for progress records
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    base_path: PathBuf,
    // Serializes read-merge-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileProgressStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProgressStore::new("./data/progress");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the record file path for a user
    fn record_path(&self, user_id: &UserId) -> PathBuf {
        let encoded: String = user_id
            .as_str()
            .bytes()
            .map(|b| format!("{:02x}", b))
            .collect();
        self.base_path.join(format!("{}.yaml", encoded))
    }

    async fn read_record(&self, path: &Path) -> Result<Option<ProgressRecord>, ProgressStoreError> {
        if !fs::try_exists(path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?
        {
            return Ok(None);
        }

        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;

        let record = serde_yaml::from_str(&yaml)
            .map_err(|e| ProgressStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(record))
    }
}

#[async_trait]
impl ProgressStore for FileProgressStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, ProgressStoreError> {
        self.read_record(&self.record_path(user_id)).await
    }

    async fn save(&self, user_id: &UserId, patch: &ProgressPatch) -> Result<(), ProgressStoreError> {
        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;

        let path = self.record_path(user_id);
        let record = match self.read_record(&path).await? {
            Some(mut record) => {
                record.apply(patch);
                record
            }
            None => ProgressRecord::from_patch(patch),
        };

        let yaml = serde_yaml::to_string(&record)
            .map_err(|e| ProgressStoreError::SerializationFailed(e.to_string()))?;

        // Write then rename so readers never see a half-written file.
        let tmp_path = path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| ProgressStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::Phase;
    use crate::domain::narrative::NarrativeOutcome;
    use crate::domain::scoring::TraitScores;
    use tempfile::TempDir;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path());

        assert!(store.load(&user("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path().join("progress"));
        let scores = TraitScores::canonical().with("analysis", 17.0);

        store
            .save(
                &user("ada"),
                &ProgressPatch {
                    scores: Some(scores.clone()),
                    current_step: Some(Phase::Results),
                    outcome: Some(Some(NarrativeOutcome::Passed)),
                    ..ProgressPatch::default()
                },
            )
            .await
            .unwrap();

        let record = store.load(&user("ada")).await.unwrap().unwrap();
        assert_eq!(record.scores, scores);
        assert_eq!(record.current_step, Phase::Results);
        assert_eq!(record.outcome, Some(NarrativeOutcome::Passed));
    }

    #[tokio::test]
    async fn save_merges_into_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path());

        store
            .save(&user("ada"), &ProgressPatch::step(Phase::Quiz))
            .await
            .unwrap();
        store
            .save(
                &user("ada"),
                &ProgressPatch {
                    current_question: Some(4),
                    ..ProgressPatch::default()
                },
            )
            .await
            .unwrap();

        let record = store.load(&user("ada")).await.unwrap().unwrap();
        assert_eq!(record.current_step, Phase::Quiz);
        assert_eq!(record.current_question, 4);
    }

    #[tokio::test]
    async fn ids_with_path_characters_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path());

        store.save(&user("a/b"), &ProgressPatch::step(Phase::Name)).await.unwrap();
        store.save(&user("a_b"), &ProgressPatch::step(Phase::Age)).await.unwrap();

        assert_eq!(
            store.load(&user("a/b")).await.unwrap().unwrap().current_step,
            Phase::Name
        );
        assert_eq!(
            store.load(&user("a_b")).await.unwrap().unwrap().current_step,
            Phase::Age
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path());
        let path = store.record_path(&user("ada"));
        std::fs::write(&path, "scores: [not, a, map]").unwrap();

        let err = store.load(&user("ada")).await.unwrap_err();
        assert!(matches!(err, ProgressStoreError::DeserializationFailed(_)));
    }
}
