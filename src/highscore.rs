//! The single persisted number: the best score so far.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub trait HighscoreStore {
    /// Stored highscore, 0 when there is none.
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Plain-text file holding one integer.
#[derive(Debug, Clone)]
pub struct HighscoreFile {
    path: PathBuf,
}

impl HighscoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for HighscoreFile {
    fn load(&mut self) -> u32 {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return 0;
        };
        match text.trim().parse() {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!("Ignoring unreadable highscore in {}", self.path.display());
                0
            }
        }
    }

    /// Write next to the target and rename over it, so a crash mid-write
    /// never leaves a truncated file.
    fn save(&mut self, score: u32) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            fs::write(&tmp, score.to_string())?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|source| Error::HighscoreWrite {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store, counting saves.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MemoryHighscore {
    pub score: u32,
    pub saves: Vec<u32>,
    /// Make every save fail.
    pub fail: bool,
}

#[cfg(any(test, feature = "test-util"))]
impl HighscoreStore for MemoryHighscore {
    fn load(&mut self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.saves.push(score);
        if self.fail {
            return Err(Error::HighscoreWrite {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("store unavailable"),
            });
        }
        self.score = score;
        Ok(())
    }
}
