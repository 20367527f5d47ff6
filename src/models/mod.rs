//! Data structures for sports tournaments: sports, matches, brackets, tournament state.

mod bracket;
mod error;
mod game;
mod sport;
mod team;
mod tournament;

pub use bracket::{Bracket, BracketRound};
pub use error::{ErrorKind, RuleViolation, TournamentError};
pub use game::{Match, MatchId, MatchStatus, ProposedResult, Side, Slot, PLACEHOLDER};
pub use sport::{Format, Round, Sport};
pub use team::TeamStats;
pub use tournament::{Tournament, TournamentId, TournamentStatus};
