//! Score, lives, high score and the top-N leaderboard.

use crate::entities::ScoreEntry;

pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub ships_left: u32,
    /// Never reset between rounds.
    pub high_score: u32,
    /// Sorted by score, highest first.
    pub leaderboard: Vec<ScoreEntry>,
}

impl GameStats {
    pub fn new(high_score: u32, leaderboard: Vec<ScoreEntry>) -> Self {
        let mut stats = Self {
            high_score,
            ..Self::default()
        };
        for entry in leaderboard {
            stats.insert_entry(entry);
        }
        stats
    }

    pub fn reset(&mut self, ship_limit: u32) {
        self.score = 0;
        self.ships_left = ship_limit;
    }

    /// Add points. Returns true when this lifted the high score.
    pub fn add_score(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn lose_ship(&mut self) -> u32 {
        self.ships_left = self.ships_left.saturating_sub(1);
        self.ships_left
    }

    /// Append the current score under `name`, keep the list sorted and
    /// trimmed to `LEADERBOARD_SIZE`.
    pub fn record_score(&mut self, name: &str) {
        self.insert_entry(ScoreEntry {
            name: name.to_string(),
            score: self.score,
        });
    }

    /// Stable sort, so equal scores keep insertion order.
    fn insert_entry(&mut self, entry: ScoreEntry) {
        self.leaderboard.push(entry);
        self.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        self.leaderboard.truncate(LEADERBOARD_SIZE);
    }
}
