//! High-score and leaderboard storage.
//!
//! Reads never fail: a missing file means zero / empty, and an unreadable
//! one is logged and treated the same way. Writes report their errors.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::entities::ScoreEntry;
use crate::error::GameError;
use crate::stats::LEADERBOARD_SIZE;

pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const LEADERBOARD_FILE: &str = "high_scores.json";

pub trait ScoreStore {
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32) -> Result<(), GameError>;
    fn load_leaderboard(&self) -> Vec<ScoreEntry>;
    fn save_leaderboard(&mut self, entries: &[ScoreEntry]) -> Result<(), GameError>;
}

/// Leaderboard as written: highest first, at most `LEADERBOARD_SIZE`.
fn normalized(entries: &[ScoreEntry]) -> Vec<ScoreEntry> {
    let mut out = entries.to_vec();
    out.sort_by(|a, b| b.score.cmp(&a.score));
    out.truncate(LEADERBOARD_SIZE);
    out
}

// ── On-disk JSON store ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct JsonScoreStore {
    dir: PathBuf,
}

impl JsonScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HOME/.space_invaders`, or `./.space_invaders` without a home.
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".space_invaders")
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!("could not read {}: {}; starting empty", path.display(), e);
                return T::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!("could not parse {}: {}; starting empty", path.display(), e);
                T::default()
            }
        }
    }

    fn write<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), GameError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        std::fs::write(&path, serde_json::to_string(value)?)?;
        info!("saved {}", path.display());
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_high_score(&self) -> u32 {
        self.read(HIGH_SCORE_FILE)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), GameError> {
        self.write(HIGH_SCORE_FILE, &score)
    }

    fn load_leaderboard(&self) -> Vec<ScoreEntry> {
        normalized(&self.read::<Vec<ScoreEntry>>(LEADERBOARD_FILE))
    }

    fn save_leaderboard(&mut self, entries: &[ScoreEntry]) -> Result<(), GameError> {
        self.write(LEADERBOARD_FILE, &normalized(entries))
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

/// Keeps everything in memory and counts writes. Used when no data
/// directory is wanted, and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    pub high_score: u32,
    pub leaderboard: Vec<ScoreEntry>,
    pub high_score_writes: usize,
    pub leaderboard_writes: usize,
}

impl ScoreStore for MemoryScoreStore {
    fn load_high_score(&self) -> u32 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), GameError> {
        self.high_score = score;
        self.high_score_writes += 1;
        Ok(())
    }

    fn load_leaderboard(&self) -> Vec<ScoreEntry> {
        self.leaderboard.clone()
    }

    fn save_leaderboard(&mut self, entries: &[ScoreEntry]) -> Result<(), GameError> {
        self.leaderboard = normalized(entries);
        self.leaderboard_writes += 1;
        Ok(())
    }
}
