use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RUN_HISTORY_LIMIT;

const APP_DIR_NAME: &str = "grid-snake";
const RECORDS_FILE_NAME: &str = "records.json";

/// Failure reading or writing a persisted file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u32,
    /// Milliseconds since the Unix epoch when the run ended.
    pub timestamp_ms: u64,
}

/// Best score and the most recent finished runs.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub best: u32,
    pub runs: Vec<RunRecord>,
}

impl Records {
    /// Appends a finished run, keeping only the newest entries, and raises
    /// the best score when beaten. Returns true on a new best.
    pub fn record_run(&mut self, score: u32, timestamp_ms: u64) -> bool {
        self.runs.push(RunRecord {
            score,
            timestamp_ms,
        });
        if self.runs.len() > RUN_HISTORY_LIMIT {
            let excess = self.runs.len() - RUN_HISTORY_LIMIT;
            self.runs.drain(..excess);
        }

        self.raise_best(score)
    }

    /// Raises the best score without recording a run. Returns true when
    /// `score` beats the previous best.
    pub fn raise_best(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    /// Highest-scoring runs first; ties list the earlier run first.
    #[must_use]
    pub fn top_runs(&self, count: usize) -> Vec<RunRecord> {
        let mut runs = self.runs.clone();
        runs.sort_by_key(|run| (Reverse(run.score), run.timestamp_ms));
        runs.truncate(count);
        runs
    }

    /// Loads records, returning empty records when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        Ok(load_json(path)?.unwrap_or_default())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self)
    }
}

/// Per-user data directory for this game.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct records file path.
#[must_use]
pub fn records_path() -> PathBuf {
    data_dir().join(RECORDS_FILE_NAME)
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Reads and parses a JSON file.
///
/// Returns `Ok(None)` when the file does not exist yet (first run).
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `value` as pretty JSON, creating parent directories when needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::test_support::TempPath;
    use super::{Records, RunRecord, StoreError};
    use crate::config::RUN_HISTORY_LIMIT;

    #[test]
    fn records_round_trip_through_disk() {
        let path = TempPath::new("round_trip");
        let mut records = Records::default();
        records.record_run(42, 1_000);

        records.save_to(path.as_path()).expect("save should succeed");
        let loaded = Records::load_from(path.as_path()).expect("load should succeed");

        assert_eq!(loaded, records);
        assert_eq!(loaded.best, 42);
    }

    #[test]
    fn missing_records_file_returns_defaults() {
        let path = TempPath::new("missing");

        let loaded = Records::load_from(path.as_path()).expect("missing file should load");

        assert_eq!(loaded, Records::default());
    }

    #[test]
    fn malformed_records_file_returns_error() {
        let path = TempPath::new("malformed");
        if let Some(parent) = path.as_path().parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path.as_path(), "not-json").expect("test file write should succeed");

        let result = Records::load_from(path.as_path());

        assert!(matches!(result, Err(StoreError::Json { .. })));
    }

    #[test]
    fn best_only_rises() {
        let mut records = Records::default();

        assert!(records.record_run(30, 1));
        assert!(!records.record_run(10, 2));
        assert!(!records.record_run(30, 3));

        assert_eq!(records.best, 30);
    }

    #[test]
    fn raising_best_leaves_history_alone() {
        let mut records = Records::default();
        records.record_run(12, 1);

        assert!(records.raise_best(20));
        assert!(!records.raise_best(15));

        assert_eq!(records.best, 20);
        assert_eq!(records.runs.len(), 1);
    }

    #[test]
    fn history_keeps_newest_runs() {
        let mut records = Records::default();
        for t in 0..(RUN_HISTORY_LIMIT as u64 + 7) {
            records.record_run(1, t);
        }

        assert_eq!(records.runs.len(), RUN_HISTORY_LIMIT);
        assert_eq!(records.runs[0].timestamp_ms, 7);
    }

    #[test]
    fn top_runs_sort_by_score_then_time() {
        let mut records = Records::default();
        records.record_run(20, 5);
        records.record_run(50, 9);
        records.record_run(20, 2);
        records.record_run(5, 1);

        let top = records.top_runs(3);

        assert_eq!(
            top,
            vec![
                RunRecord {
                    score: 50,
                    timestamp_ms: 9
                },
                RunRecord {
                    score: 20,
                    timestamp_ms: 2
                },
                RunRecord {
                    score: 20,
                    timestamp_ms: 5
                },
            ]
        );
    }
}
