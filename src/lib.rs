//! Single-elimination sports tournaments: library with models, bracket logic, and the tournament service.

pub mod logic;
pub mod models;
pub mod service;

pub use logic::{
    advance, can_complete, champion, current_round, generate, podium, progress, team_stats,
    validate, AdvancementOutcome, Layout, Placement, Podium, Progress, SlotFill,
};
pub use models::{
    Bracket, BracketRound, ErrorKind, Format, Match, MatchId, MatchStatus, ProposedResult, Round,
    RuleViolation, Side, Slot, Sport, TeamStats, Tournament, TournamentError, TournamentId,
    TournamentStatus, PLACEHOLDER,
};
pub use service::{
    Action, Event, InMemoryStore, LogNotifier, NoopNotifier, Notifier, ResultSubmission,
    TournamentService, TournamentStore,
};
