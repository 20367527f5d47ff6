//! TeamStats: per-team record derived from completed matches.

use serde::{Deserialize, Serialize};

/// Statistics view of a team (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: i64,
    pub points_against: i64,
    /// Lost a match that sends nobody further (no loser bracket or third-place slot).
    pub eliminated: bool,
}

impl TeamStats {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }

    /// Record a win with the given score line.
    pub fn add_win(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.wins += 1;
        self.add_points(scored, conceded);
    }

    /// Record a loss with the given score line.
    pub fn add_loss(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.losses += 1;
        self.add_points(scored, conceded);
    }

    pub fn point_difference(&self) -> i64 {
        self.points_for - self.points_against
    }

    fn add_points(&mut self, scored: i32, conceded: i32) {
        self.points_for += i64::from(scored);
        self.points_against += i64::from(conceded);
    }
}
