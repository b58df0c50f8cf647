//! Durable storage for leaderboard records.

use crate::leaderboard::stats::PlayerStats;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Leaderboard store could not be read or written.
#[derive(Debug)]
pub enum LeaderboardError {
    Io(io::Error),
    /// Stored data is not a valid record list.
    Json(serde_json::Error),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::Io(e) => write!(f, "Leaderboard store I/O error: {}", e),
            LeaderboardError::Json(e) => write!(f, "Leaderboard store is corrupt: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::Io(e) => Some(e),
            LeaderboardError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for LeaderboardError {
    fn from(e: io::Error) -> Self {
        LeaderboardError::Io(e)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(e: serde_json::Error) -> Self {
        LeaderboardError::Json(e)
    }
}

/// Whole-snapshot storage: every save replaces the full record set.
pub trait LeaderboardRepository {
    fn load(&self) -> Result<Vec<PlayerStats>, LeaderboardError>;
    fn save(&self, records: &[PlayerStats]) -> Result<(), LeaderboardError>;
    /// Drop every record.
    fn clear(&self) -> Result<(), LeaderboardError>;
}

/// Records kept as one JSON array in a file. A missing file is an empty leaderboard.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<PlayerStats>, LeaderboardError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, records: &[PlayerStats]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_vec_pretty(records)?;
        // Write next to the target and rename so readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), LeaderboardError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and for running without a leaderboard file.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<PlayerStats>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PlayerStats>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl LeaderboardRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<PlayerStats>, LeaderboardError> {
        Ok(self.records.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, records: &[PlayerStats]) -> Result<(), LeaderboardError> {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = records.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), LeaderboardError> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}
