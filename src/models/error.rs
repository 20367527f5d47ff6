//! Errors raised by the engine and the tournament service.

use crate::models::game::MatchId;
use crate::models::sport::{Format, Sport};
use crate::models::tournament::TournamentId;
use thiserror::Error;

/// A submitted result broke one of the result rules. Nothing is recorded when this is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RuleViolation {
    /// The match already has a result.
    #[error("match is already completed")]
    AlreadyCompleted,

    /// The winner is neither team1 nor team2, or is still a placeholder.
    #[error("winner {winner:?} is not one of the match's teams")]
    InvalidWinner { winner: String },

    /// A score falls outside the sport's range.
    #[error("score {score} is outside the allowed range {min}-{max}")]
    ScoreRange { score: i32, min: i32, max: i32 },

    /// Both scores are equal.
    #[error("draws are not allowed")]
    DrawNotAllowed,

    /// The declared winner has the lower score.
    #[error("declared winner {winner:?} does not have the higher score")]
    ScoreWinnerMismatch { winner: String },
}

/// Coarse classification a transport layer maps onto its own status codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    RuleViolation,
    Internal,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Fewer teams than the sport's minimum.
    #[error("{sport} needs at least {required} teams (got {actual})")]
    NotEnoughTeams {
        sport: Sport,
        required: usize,
        actual: usize,
    },

    /// The format is not offered for the sport.
    #[error("format {format} is not available for {sport}")]
    InvalidFormat { sport: Sport, format: Format },

    /// Malformed input, such as an unsupported bracket size or a bad team name.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A sport, format or round name that does not parse.
    #[error("unknown {kind} {value:?}")]
    UnknownValue { kind: &'static str, value: String },

    /// No tournament with this id.
    #[error("tournament {0} not found")]
    TournamentNotFound(TournamentId),

    /// No match with this id.
    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    /// The sport already has an active tournament.
    #[error("an active {0} tournament already exists")]
    ActiveTournamentExists(Sport),

    /// Deletion refused while matches exist.
    #[error("tournament {id} still has {count} matches")]
    TournamentHasMatches { id: TournamentId, count: usize },

    /// One of the match's slots is still `TBD`.
    #[error("match {0} does not have both teams decided yet")]
    MatchNotReady(MatchId),

    /// Completion requested before every match has a result.
    #[error("not all matches are completed")]
    IncompleteResults,

    /// The tournament was already completed.
    #[error("tournament {0} is already completed")]
    AlreadyCompleted(TournamentId),

    /// A result broke one of the result rules.
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    /// The store failed or a lock was poisoned.
    #[error("storage error: {0}")]
    Storage(String),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            NotEnoughTeams { .. } | InvalidFormat { .. } | Validation(_) | UnknownValue { .. } => {
                ErrorKind::Validation
            }
            TournamentNotFound(_) | MatchNotFound(_) => ErrorKind::NotFound,
            ActiveTournamentExists(_)
            | TournamentHasMatches { .. }
            | MatchNotReady(_)
            | IncompleteResults
            | AlreadyCompleted(_) => ErrorKind::Conflict,
            Rule(_) => ErrorKind::RuleViolation,
            Storage(_) => ErrorKind::Internal,
        }
    }
}
