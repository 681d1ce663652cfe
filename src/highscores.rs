//! High score records
//!
//! Persisted as a JSON file, one descending list per level. Storage lives
//! outside the simulation: nothing here is called from a tick.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores kept per level
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

/// High score tables keyed by level
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub levels: BTreeMap<u32, Vec<ScoreEntry>>,
}

impl HighScores {
    /// Create empty tables
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Entries for one level, best first
    pub fn entries(&self, level: u32) -> &[ScoreEntry] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if a score qualifies for a level's table
    pub fn qualifies(&self, level: u32, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.entries(level);
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, level: u32, score: u64) -> Option<usize> {
        if !self.qualifies(level, score) {
            return None;
        }
        let entries = self.entries(level);
        let rank = entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(entries.len()) + 1)
    }

    /// Add a score (if it qualifies), returning the rank achieved
    pub fn add_score(&mut self, name: &str, score: u64, level: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(level, score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            level,
            timestamp,
        };

        let entries = self.levels.entry(level).or_default();
        // Find insertion point (sorted descending by score)
        let pos = entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                entries.insert(i, entry);
                i + 1
            }
            None => {
                entries.push(entry);
                entries.len()
            }
        };

        entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if every table is empty
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }

    /// Best score on a level (if any)
    pub fn top_score(&self, level: u32) -> Option<u64> {
        self.entries(level).first().map(|e| e.score)
    }

    /// Load high scores; a missing or corrupt file gives empty tables
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!(
                        "Loaded {} high scores",
                        scores.levels.values().map(Vec::len).sum::<usize>()
                    );
                    scores
                }
                Err(e) => {
                    log::warn!("High score file {} is corrupt ({}), starting fresh", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("High scores saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// Current Unix time in seconds
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
