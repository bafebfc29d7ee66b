//! Durable storage of the whole [`StoreState`].
//!
//! Every save rewrites the complete record set, so this is only suitable for
//! small boards (hundreds to a few thousand votes). Past that, the cost of a
//! single edit grows with the size of the file.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use shared::models::StoreState;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt state in {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io { path: path.to_path_buf(), source }
}

#[rocket::async_trait]
pub trait Persistence: Send + Sync {
    /// Reads the stored state, creating an empty one when nothing is stored yet.
    async fn load(&self) -> Result<StoreState, PersistenceError>;

    /// Replaces the stored state. Either the new state is stored in full or
    /// the previous one is left untouched.
    async fn save(&self, state: &StoreState) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file, replaced through a sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn write_temp(&self, temp: &Path, json: &str) -> Result<(), PersistenceError> {
        let mut file = fs::File::create(temp).await.map_err(io_error(temp))?;
        file.write_all(json.as_bytes()).await.map_err(io_error(temp))?;
        file.sync_all().await.map_err(io_error(temp))?;
        Ok(())
    }
}

#[rocket::async_trait]
impl Persistence for JsonFile {
    async fn load(&self) -> Result<StoreState, PersistenceError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No data file yet, creating an empty one");
                let state = StoreState::default();
                self.save(&state).await?;
                return Ok(state);
            }
            Err(e) => return Err(io_error(&self.path)(e)),
        };

        let state: StoreState = serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        check_loaded_state(&self.path, state)
    }

    async fn save(&self, state: &StoreState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_error(parent))?;
        }

        let temp = self.temp_path();
        let written = match self.write_temp(&temp, &json).await {
            Ok(()) => fs::rename(&temp, &self.path).await.map_err(io_error(&self.path)),
            Err(e) => Err(e),
        };

        if written.is_err() {
            let _ = fs::remove_file(&temp).await;
        } else {
            debug!(path = %self.path.display(), records = state.records.len(), "Saved vote store");
        }
        written
    }
}

/// Rejects duplicate ids and repairs a counter that lags behind the records.
fn check_loaded_state(path: &Path, mut state: StoreState) -> Result<StoreState, PersistenceError> {
    let mut seen = HashSet::with_capacity(state.records.len());
    if let Some(dup) = state.records.iter().find(|r| !seen.insert(r.id)) {
        return Err(PersistenceError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("duplicate vote id {}", dup.id),
        });
    }

    if let Some(max_id) = state.max_id() {
        if state.next_id <= max_id {
            let raised = max_id.checked_add(1).ok_or_else(|| PersistenceError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("vote id {} leaves no room for a next id", max_id),
            })?;
            warn!(
                path = %path.display(),
                next_id = state.next_id,
                max_id,
                "nextId is not above the largest stored id, raising it"
            );
            state.next_id = raised;
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{VoteId, VoteRecord};
    use time::macros::datetime;

    fn sample_state() -> StoreState {
        StoreState {
            records: vec![
                VoteRecord {
                    id: 2,
                    title: "Lunch".into(),
                    content: Some("pizza or tacos".into()),
                    created_at: datetime!(2024-05-01 12:30:00.250 UTC),
                },
                VoteRecord {
                    id: 4,
                    title: "Retro".into(),
                    content: None,
                    created_at: datetime!(2024-05-02 09:00:00 UTC),
                },
            ],
            next_id: 5,
        }
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("votes.json");
        let file = JsonFile::new(&path);

        let state = file.load().await.unwrap();
        assert_eq!(state, StoreState::default());

        let raw = std::fs::read_to_string(&path).unwrap();
        let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk, serde_json::json!({ "votes": [], "nextId": 1 }));
    }

    #[tokio::test]
    async fn save_then_load_returns_same_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("votes.json"));

        file.save(&sample_state()).await.unwrap();
        assert_eq!(file.load().await.unwrap(), sample_state());
        assert!(!file.temp_path().exists());
    }

    #[tokio::test]
    async fn saved_file_is_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("votes.json"));
        file.save(&StoreState::default()).await.unwrap();

        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw, "{\n  \"votes\": [],\n  \"nextId\": 1\n}");
    }

    #[tokio::test]
    async fn corrupt_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.json");
        std::fs::write(&path, "{ \"votes\": [").unwrap();

        let err = JsonFile::new(&path).load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"votes\": [");
    }

    #[tokio::test]
    async fn duplicate_ids_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sample_state();
        state.records[1].id = 2;
        let file = JsonFile::new(dir.path().join("votes.json"));
        file.save(&state).await.unwrap();

        let err = file.load().await.unwrap_err();
        assert!(err.to_string().contains("duplicate vote id 2"));
    }

    #[tokio::test]
    async fn lagging_counter_is_raised() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sample_state();
        state.next_id = 3;
        let file = JsonFile::new(dir.path().join("votes.json"));
        file.save(&state).await.unwrap();

        assert_eq!(file.load().await.unwrap().next_id, 5);
    }

    #[tokio::test]
    async fn largest_possible_id_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sample_state();
        state.records[1].id = VoteId::MAX;
        let file = JsonFile::new(dir.path().join("votes.json"));
        file.save(&state).await.unwrap();

        let err = file.load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
        assert!(err.to_string().contains("no room for a next id"));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.json");
        let file = JsonFile::new(&path);
        file.save(&sample_state()).await.unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(file.temp_path()).unwrap();
        let err = file.save(&StoreState::default()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));

        assert_eq!(file.load().await.unwrap(), sample_state());
    }
}
