//! Best-score persistence.
//!
//! The engine never touches storage. After each turn the front end hands
//! the current score to a [`BestScore`] tracker, which writes through to a
//! [`ScoreStore`] only when the previous best is beaten.
//!
//! # File format
//!
//! [`FileScoreStore`] keeps a single JSON document:
//!
//! ```text
//! {"best_score": 2048}
//! ```
//!
//! A missing file reads as 0.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed score file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persists a best-score integer across sessions.
pub trait ScoreStore {
    fn load_best(&self) -> Result<u32, StoreError>;
    fn save_best(&mut self, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_best(&self) -> Result<u32, StoreError> {
        (**self).load_best()
    }

    fn save_best(&mut self, value: u32) -> Result<(), StoreError> {
        (**self).save_best(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct ScoreFile {
    best_score: u32,
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load_best(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_err(e)),
        };

        let file: ScoreFile =
            serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.best_score)
    }

    fn save_best(&mut self, value: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let text = serde_json::to_string(&ScoreFile { best_score: value }).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write-then-rename: readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

/// In-memory store, for tests and for play without persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryScoreStore {
    best: u32,
    saves: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of times `save_best` was called.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save_best(&mut self, value: u32) -> Result<(), StoreError> {
        self.best = value;
        self.saves += 1;
        Ok(())
    }
}

/// Tracks the best score and writes through to a store when it is beaten.
#[derive(Debug, Clone)]
pub struct BestScore<S> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> BestScore<S> {
    /// Load the current best. A store that cannot be read starts from 0.
    pub fn load(store: S) -> Self {
        let best = store.load_best().unwrap_or_else(|e| {
            warn!("could not load best score: {e}");
            0
        });
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record `score`; persists and returns true only when it beats the best.
    ///
    /// Save failures are logged, the in-memory best still advances.
    pub fn update(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        info!("new best score: {score}");
        if let Err(e) = self.store.save_best(score) {
            warn!("could not save best score: {e}");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_only_moves_up() {
        let mut best = BestScore::load(MemoryScoreStore::new(100));
        assert_eq!(best.best(), 100);

        assert!(!best.update(40));
        assert!(!best.update(100));
        assert_eq!(best.store().saves(), 0);

        assert!(best.update(120));
        assert_eq!(best.best(), 120);
        assert_eq!(best.store().saves(), 1);
        assert_eq!(best.store().load_best().unwrap(), 120);
    }

    #[test]
    fn test_file_store_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(dir.path().join("best.json"));
        assert_eq!(store.load_best().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");

        let mut store = FileScoreStore::new(&path);
        assert_eq!(store.path(), path);
        store.save_best(2048).unwrap();

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.load_best().unwrap(), 2048);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, r#"{"best_score":2048}"#);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();

        let store = FileScoreStore::new(&path);
        let err = store.load_best().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }), "{err}");

        // The tracker falls back to zero instead of failing.
        assert_eq!(BestScore::load(store).best(), 0);
    }
}
