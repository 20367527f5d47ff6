//! Tournament and TournamentStatus.

use crate::models::error::TournamentError;
use crate::models::sport::{Format, Sport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Matches are being played.
    #[default]
    Active,
    /// Every match has a result and completion was requested. Never reopened.
    Completed,
}

/// A tournament for one sport. Its matches are stored separately, keyed by `id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub sport: Sport,
    pub format: Format,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a new active tournament.
    pub fn new(sport: Sport, format: Format) -> Self {
        Self {
            id: Uuid::new_v4(),
            sport,
            format,
            status: TournamentStatus::Active,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TournamentStatus::Active
    }

    /// Move to `Completed`. `all_matches_completed` comes from the progress tracker.
    pub fn complete(&mut self, all_matches_completed: bool) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::AlreadyCompleted(self.id));
        }
        if !all_matches_completed {
            return Err(TournamentError::IncompleteResults);
        }
        self.status = TournamentStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}
