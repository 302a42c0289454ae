//! Scoring and the persisted high-score table.
//!
//! The running score is not accumulated: every tick it is recomputed as the
//! player's straight-line displacement from spawn, truncated to an integer.
//! Scores only reach the high-score table on a reset/loss event, and the
//! table itself is persisted through a narrow [`ScoreStore`] capability so
//! the storage backend stays swappable. Persistence failure is never fatal;
//! the table degrades to in-memory for the session.

use std::fs;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

use crate::game::Actor;

/// Fixed identifier the high-score table is stored under.
pub const HIGH_SCORE_KEY: &str = "farol-highscores";

/// How many entries the table keeps.
pub const HIGH_SCORE_CAPACITY: usize = 5;

/// Errors surfaced by a [`ScoreStore`] backend.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("score storage format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persistence capability for ordered integer sequences, keyed by a fixed
/// string identifier.
pub trait ScoreStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, ScoreStoreError>;
    fn save(&self, key: &str, scores: &[u32]) -> Result<(), ScoreStoreError>;
}

/// File-backed store: one JSON array of integers per key, under a base
/// directory.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    dir: PathBuf,
}

impl FileScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, ScoreStoreError> {
        let text = fs::read_to_string(self.path_for(key))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, key: &str, scores: &[u32]) -> Result<(), ScoreStoreError> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string(scores)?;
        fs::write(self.path_for(key), text)?;
        Ok(())
    }
}

/// Current score for the player: integer displacement from spawn.
pub fn displacement_score(player: &Actor) -> u32 {
    player
        .transform
        .position
        .distance_to(&player.spawn.position) as u32
}

/// Descending, capacity-bounded list of best scores.
#[derive(Debug, Clone)]
pub struct HighScoreTable {
    scores: Vec<u32>,
    capacity: usize,
}

impl HighScoreTable {
    /// Loads the table from `store`, degrading to an empty in-memory table
    /// when the backend is unavailable.
    pub fn load_or_default(store: &dyn ScoreStore, key: &str, capacity: usize) -> Self {
        match store.load(key) {
            Ok(mut scores) => {
                scores.sort_unstable_by(|a, b| b.cmp(a));
                scores.truncate(capacity);
                Self { scores, capacity }
            }
            Err(err) => {
                warn!("high scores unavailable ({err}), starting empty");
                Self::empty(capacity)
            }
        }
    }

    pub fn empty(capacity: usize) -> Self {
        Self {
            scores: Vec::new(),
            capacity,
        }
    }

    /// Records a finished run's score, keeping the table sorted descending
    /// and bounded.
    pub fn submit(&mut self, score: u32) {
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(self.capacity);
    }

    /// Writes the table through `store`. Failure is logged and swallowed;
    /// the in-memory table remains authoritative for the session.
    pub fn persist(&self, store: &dyn ScoreStore, key: &str) {
        if let Err(err) = store.save(key, &self.scores) {
            warn!("failed to persist high scores: {err}");
        }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }
}
