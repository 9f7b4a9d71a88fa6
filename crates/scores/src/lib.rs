//! Local score board for finished rounds.

use common::{GameError, GameResult};
use serde::{Deserialize, Serialize};

/// How many results the board keeps.
pub const BOARD_CAPACITY: usize = 10;

/// Best final scores, highest first.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    entries: Vec<i32>,
}

impl ScoreBoard {
    /// Loads the board from a JSON file. A missing file yields an empty
    /// board.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|e| GameError::Parse(e.to_string()))
    }

    /// Saves the board back to disk.
    pub fn save(&self, path: &str) -> GameResult<()> {
        let data = serde_json::to_string_pretty(self).map_err(|e| GameError::Parse(e.to_string()))?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Records a final score and returns its 1-based rank. The board keeps
    /// only the top [`BOARD_CAPACITY`] results.
    pub fn submit(&mut self, score: i32) -> usize {
        let rank = self
            .entries
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, score);
        self.entries.truncate(BOARD_CAPACITY);
        rank + 1
    }

    /// Records a final score and saves immediately.
    pub fn submit_and_save(&mut self, path: &str, score: i32) -> GameResult<usize> {
        let rank = self.submit(score);
        self.save(path)?;
        Ok(rank)
    }

    /// Recorded scores, highest first.
    pub fn entries(&self) -> &[i32] {
        &self.entries
    }

    /// Best score so far.
    pub fn best(&self) -> Option<i32> {
        self.entries.first().copied()
    }
}
