//! High-score persistence: a single integer, the best final balance so far.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold a number: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

/// Result of offering a final balance to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    NewHigh(u64),
    Kept { high: u64 },
}

pub trait HighScoreStore {
    fn read_high_score(&self) -> Result<u64, StoreError>;

    fn write_high_score(&mut self, score: u64) -> Result<(), StoreError>;

    /// Stores `balance` only when it beats the current high score.
    fn record(&mut self, balance: u64) -> Result<Recorded, StoreError> {
        let high = self.read_high_score()?;
        if balance > high {
            self.write_high_score(balance)?;
            Ok(Recorded::NewHigh(balance))
        } else {
            Ok(Recorded::Kept { high })
        }
    }

    fn reset(&mut self) -> Result<(), StoreError> {
        self.write_high_score(0)
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for &mut T {
    fn read_high_score(&self) -> Result<u64, StoreError> {
        (**self).read_high_score()
    }

    fn write_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        (**self).write_high_score(score)
    }
}

/// Plain text file holding one integer. A missing file reads as zero.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
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

impl HighScoreStore for FileHighScoreStore {
    fn read_high_score(&self) -> Result<u64, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score file yet");
                return Ok(0);
            }
            Err(e) => return Err(self.io_err(e)),
        };
        let first = raw.lines().next().unwrap_or("").trim();
        if first.is_empty() {
            return Ok(0);
        }
        first.parse().map_err(|_| StoreError::Corrupt {
            path: self.path.clone(),
            content: first.to_string(),
        })
    }

    fn write_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        std::fs::write(&self.path, format!("{score}\n")).map_err(|e| self.io_err(e))?;
        info!(path = %self.path.display(), score, "high score written");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub score: u64,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn read_high_score(&self) -> Result<u64, StoreError> {
        Ok(self.score)
    }

    fn write_high_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.score = score;
        Ok(())
    }
}
