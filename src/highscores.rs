//! High score persistence
//!
//! A single best score survives between sessions. Storage sits behind
//! [`HighScoreStore`] so the engine never touches the filesystem directly.
//! Writes go to a temporary file first and are renamed over the save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reading or writing persisted data
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersistError {
    /// True when the underlying file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}

/// Somewhere the best score lives between sessions
pub trait HighScoreStore {
    /// The stored best score. A store that has never been written yields 0
    /// or a not-found error.
    fn load(&self) -> Result<u64, PersistError>;

    /// Replace the stored best score
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u64,
}

/// Stores the best score as `{"high_score": n}` in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, PersistError> {
        let json = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }

    /// Last saved value, if anything was ever stored
    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, PersistError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        Ok(())
    }
}

/// Load the best score, treating any failure as "no high score yet"
pub fn load_or_default(store: &dyn HighScoreStore) -> u64 {
    match store.load() {
        Ok(score) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Err(err) if err.is_not_found() => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(err) => {
            log::warn!("High score unreadable ({}), starting from 0", err);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lightrunner_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("hs_round_trip");
        let mut store = JsonFileStore::new(&path);
        store.save(4321).expect("save");
        assert_eq!(store.load().expect("load"), 4321);

        let raw = fs::read_to_string(&path).expect("read raw");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["high_score"], 4321);
        assert!(!store.tmp_path().exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_rename_cleans_up_tmp() {
        // A non-empty directory at the save path makes the rename fail
        let dir = temp_path("hs_dir_in_the_way");
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join("keep"), "x").expect("write");

        let mut store = JsonFileStore::new(&dir);
        assert!(matches!(store.save(12), Err(PersistError::Io(_))));
        assert!(!store.tmp_path().exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = JsonFileStore::new(temp_path("hs_missing"));
        assert!(store.load().map_err(|e| e.is_not_found()).unwrap_err());
        assert_eq!(load_or_default(&store), 0);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let path = temp_path("hs_corrupt");
        fs::write(&path, "{\"high_score\": \"lots\"").expect("write");
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Json(_))));
        assert_eq!(load_or_default(&store), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_object_is_zero() {
        let path = temp_path("hs_empty_object");
        fs::write(&path, "{}").expect("write");
        assert_eq!(JsonFileStore::new(&path).load().expect("load"), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().expect("load"), 0);
        assert_eq!(store.value(), None);
        store.save(10).expect("save");
        assert_eq!(store.load().expect("load"), 10);
        assert_eq!(MemoryStore::with_score(7).load().expect("load"), 7);
    }
}
