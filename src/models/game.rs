//! Match, Side, and the bracket edges that link one match to the next.

use crate::models::sport::Round;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Team slot value until an earlier match decides who plays here.
pub const PLACEHOLDER: &str = "TBD";

/// Which of the two team slots of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    /// Slot for the bracket position `index`: even positions take side one.
    pub fn from_parity(index: usize) -> Self {
        if index % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// Destination of a team leaving a match: a slot in a later match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub match_id: MatchId,
    pub side: Side,
}

/// A result as submitted, before validation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProposedResult {
    pub score1: i32,
    pub score2: i32,
    pub winner: String,
}

impl ProposedResult {
    pub fn new(score1: i32, score2: i32, winner: impl Into<String>) -> Self {
        Self {
            score1,
            score2,
            winner: winner.into(),
        }
    }
}

/// A single match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: Round,
    pub team1: String,
    pub team2: String,
    pub status: MatchStatus,
    /// Score, winner and completion time are set together, only once completed.
    pub score1: Option<i32>,
    pub score2: Option<i32>,
    pub winner: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Where the winner goes. None for terminal rounds and for records stored without edges.
    #[serde(default)]
    pub winner_to: Option<Slot>,
    /// Where the loser goes: the loser bracket or the third-place match.
    #[serde(default)]
    pub loser_to: Option<Slot>,
}

impl Match {
    /// New pending match. Use [`PLACEHOLDER`] for undecided teams.
    pub fn new(
        tournament_id: TournamentId,
        round: Round,
        team1: impl Into<String>,
        team2: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            team1: team1.into(),
            team2: team2.into(),
            status: MatchStatus::Pending,
            score1: None,
            score2: None,
            winner: None,
            scheduled_at,
            completed_at: None,
            winner_to: None,
            loser_to: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::One => &self.team1,
            Side::Two => &self.team2,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::One => &mut self.team1,
            Side::Two => &mut self.team2,
        }
    }

    pub fn is_open(&self, side: Side) -> bool {
        self.team(side) == PLACEHOLDER
    }

    /// Both teams are known, so a result can be played.
    pub fn is_ready(&self) -> bool {
        !self.is_open(Side::One) && !self.is_open(Side::Two)
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// First open side, team1 preferred.
    pub fn open_side(&self) -> Option<Side> {
        [Side::One, Side::Two].into_iter().find(|&side| self.is_open(side))
    }

    /// Put `team` into `side` if that slot is still open. Returns whether it was filled.
    pub fn fill(&mut self, side: Side, team: &str) -> bool {
        if !self.is_open(side) {
            return false;
        }
        *self.team_mut(side) = team.to_string();
        true
    }

    /// The team that lost, once completed.
    pub fn loser(&self) -> Option<&str> {
        let winner = self.winner.as_deref()?;
        if winner == self.team1 {
            Some(&self.team2)
        } else {
            Some(&self.team1)
        }
    }

    /// Store a validated result. Callers run the result rules first.
    pub fn record_result(&mut self, result: &ProposedResult, completed_at: DateTime<Utc>) {
        self.score1 = Some(result.score1);
        self.score2 = Some(result.score2);
        self.winner = Some(result.winner.clone());
        self.completed_at = Some(completed_at);
        self.status = MatchStatus::Completed;
    }
}
