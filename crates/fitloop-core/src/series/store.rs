//! Series storage and persistence.
//!
//! The whole collection lives in a single JSON slot (`series.json` under the
//! data dir). Every successful save is a full overwrite of that slot; the
//! data volume (a handful of series, each with a handful of steps) never
//! justifies incremental writes.
//!
//! To keep independent commits from clobbering each other, mutation goes
//! through keyed operations (`upsert`, `remove`) that perform the
//! load-merge-save internally. `save_all` remains for whole-collection
//! replacement.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::series::Series;
use crate::storage::data_dir;

/// Wrapper for the serialized collection.
#[derive(Serialize, Deserialize)]
struct SeriesFile {
    series: Vec<Series>,
}

/// Durable store for the user's series collection.
pub struct SeriesStore {
    path: PathBuf,
}

impl SeriesStore {
    /// Open the store at `<data_dir>/series.json`.
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the data directory cannot be created.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::Unavailable {
            path: PathBuf::from("~/.config/fitloop"),
            source,
        })?;
        Ok(Self {
            path: dir.join("series.json"),
        })
    }

    /// Open a store backed by a custom path (tests, alternate profiles).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted collection. A missing slot is an empty collection.
    ///
    /// # Errors
    /// `Corrupt` if the slot exists but cannot be parsed into valid series
    /// records; callers treat that as empty and surface a warning.
    /// `Unavailable` for any other read failure.
    pub fn load_all(&self) -> Result<Vec<Series>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Unavailable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let file: SeriesFile =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        for series in &file.series {
            if !series.has_unique_step_ids() {
                return Err(StoreError::Corrupt(format!(
                    "series '{}' has duplicate step ids",
                    series.id
                )));
            }
        }
        Ok(file.series)
    }

    /// Replace the entire persisted collection.
    ///
    /// The write goes to a sibling temp file which is then renamed over the
    /// slot, so a reader never observes a partially written collection and a
    /// failed write leaves the previous contents intact.
    ///
    /// # Errors
    /// `Unavailable` if the write cannot complete; the previously persisted
    /// collection is unchanged.
    pub fn save_all(&self, series: &[Series]) -> Result<(), StoreError> {
        let file = SeriesFile {
            series: series.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let unavailable = |source: std::io::Error| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(unavailable)?;
        std::fs::rename(&tmp, &self.path).map_err(unavailable)?;
        Ok(())
    }

    /// Insert or replace a single series, keyed by id.
    ///
    /// Loads immediately before the write so two upserts of different series
    /// never overwrite each other's changes.
    pub fn upsert(&self, series: Series) -> Result<(), StoreError> {
        let mut all = self.load_all_lenient();
        match all.iter_mut().find(|s| s.id == series.id) {
            Some(slot) => *slot = series,
            None => all.push(series),
        }
        self.save_all(&all)
    }

    /// Remove a series by id, persisting immediately. Returns whether a
    /// record was removed; a missing id is a successful no-op.
    pub fn remove(&self, series_id: &str) -> Result<bool, StoreError> {
        let mut all = self.load_all_lenient();
        let before = all.len();
        all.retain(|s| s.id != series_id);
        if all.len() == before {
            return Ok(false);
        }
        self.save_all(&all)?;
        Ok(true)
    }

    /// Remove the persisted collection entirely. Idempotent.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Unavailable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Load for read-modify-write: a corrupt slot degrades to an empty
    /// collection (with a warning) rather than blocking the mutation.
    fn load_all_lenient(&self) -> Vec<Series> {
        match self.load_all() {
            Ok(all) => all,
            Err(StoreError::Corrupt(msg)) => {
                tracing::warn!(%msg, "stored series collection unreadable, starting empty");
                Vec::new()
            }
            Err(StoreError::Unavailable { ref path, ref source }) => {
                tracing::warn!(path = %path.display(), %source, "series collection unreadable");
                Vec::new()
            }
        }
    }
}
