//! Tournament service: the operations a transport layer calls.
//!
//! Composes the engine with a [`TournamentStore`] and a [`Notifier`]. Every mutation
//! of one tournament runs under that tournament's lock, so two sibling results can
//! never race for the same next-round slot.

mod events;
mod store;

pub use events::{Action, Event, LogNotifier, NoopNotifier, Notifier};
pub use store::{InMemoryStore, TournamentStore};

use crate::logic::{self, AdvancementOutcome, Podium, Progress};
use crate::models::{
    Bracket, Format, Match, MatchId, ProposedResult, Sport, TeamStats, Tournament,
    TournamentError, TournamentId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome of a result submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSubmission {
    /// The match as stored after the result was recorded.
    #[serde(rename = "match")]
    pub game: Match,
    /// `None` when advancement could not run at all; the result stays recorded.
    pub advancement: Option<AdvancementOutcome>,
}

fn lock_error<T>(_: PoisonError<T>) -> TournamentError {
    TournamentError::Storage("lock error".into())
}

pub struct TournamentService<S, N> {
    store: S,
    notifier: N,
    /// One lock per tournament, created on first use.
    locks: Mutex<HashMap<TournamentId, Arc<Mutex<()>>>>,
    /// Serializes the active-tournament check with the insert.
    create_lock: Mutex<()>,
}

impl<S: TournamentStore, N: Notifier> TournamentService<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            locks: Mutex::new(HashMap::new()),
            create_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn tournament_lock(&self, id: TournamentId) -> Result<Arc<Mutex<()>>, TournamentError> {
        let mut locks = self.locks.lock().map_err(lock_error)?;
        Ok(locks.entry(id).or_default().clone())
    }

    fn load_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store
            .tournament(id)?
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    fn load_match(&self, id: MatchId) -> Result<Match, TournamentError> {
        self.store.get_match(id)?.ok_or(TournamentError::MatchNotFound(id))
    }

    /// Create a tournament and its bracket, scheduled from now.
    pub fn create_tournament(
        &self,
        sport: Sport,
        format: Format,
        teams: &[String],
    ) -> Result<(Tournament, Bracket), TournamentError> {
        self.create_tournament_at(sport, format, teams, Utc::now())
    }

    /// Create a tournament whose first match starts at `start`.
    ///
    /// Fails with `ActiveTournamentExists` while another tournament of the sport is active.
    pub fn create_tournament_at(
        &self,
        sport: Sport,
        format: Format,
        teams: &[String],
        start: DateTime<Utc>,
    ) -> Result<(Tournament, Bracket), TournamentError> {
        let _guard = self.create_lock.lock().map_err(lock_error)?;
        if self.store.active_tournament(sport)?.is_some() {
            return Err(TournamentError::ActiveTournamentExists(sport));
        }

        let tournament = Tournament::new(sport, format);
        let bracket = logic::generate(tournament.id, sport, format, teams, start)?;

        self.store.insert_tournament(&tournament)?;
        let matches: Vec<Match> = bracket.matches().cloned().collect();
        self.store.insert_matches(&matches)?;

        log::info!(
            "Created {} {} tournament {} with {} teams",
            format,
            sport,
            tournament.id,
            teams.len()
        );
        self.notifier.notify(Event::TournamentUpdated {
            tournament: tournament.clone(),
            action: Action::Created,
        });
        for game in matches {
            self.notifier.notify(Event::MatchUpdated {
                game,
                action: Action::Created,
            });
        }
        Ok((tournament, bracket))
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.load_tournament(id)
    }

    pub fn tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        self.store.tournaments()
    }

    pub fn bracket(&self, id: TournamentId) -> Result<Bracket, TournamentError> {
        let tournament = self.load_tournament(id)?;
        let matches = self.store.matches_by_tournament(id)?;
        Ok(Bracket::from_matches(
            id,
            tournament.sport,
            tournament.format,
            matches,
        ))
    }

    /// Record a result and advance its teams.
    ///
    /// The result is validated as a whole and nothing is written when a rule fails.
    /// Once recorded it stays recorded, even if advancement finds no open slot or
    /// fails to persist.
    pub fn submit_result(
        &self,
        match_id: MatchId,
        score1: i32,
        score2: i32,
        winner: &str,
    ) -> Result<ResultSubmission, TournamentError> {
        let tournament_id = self.load_match(match_id)?.tournament_id;
        let lock = self.tournament_lock(tournament_id)?;
        let _guard = lock.lock().map_err(lock_error)?;

        let tournament = self.load_tournament(tournament_id)?;
        let mut game = self.load_match(match_id)?;
        if !game.is_completed() && !game.is_ready() {
            return Err(TournamentError::MatchNotReady(match_id));
        }

        let result = ProposedResult::new(score1, score2, winner);
        logic::validate(tournament.sport, &game, &result)?;

        game.record_result(&result, Utc::now());
        self.store.update_match(&game)?;
        self.notifier.notify(Event::MatchResult {
            game: game.clone(),
            action: Action::ResultUpdated,
        });
        self.notifier.notify(Event::MatchUpdated {
            game: game.clone(),
            action: Action::ResultUpdated,
        });

        let advancement = match self.advance_locked(&tournament, &game) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("Advancing match {} failed: {}", match_id, e);
                None
            }
        };
        Ok(ResultSubmission { game, advancement })
    }

    /// Advance a completed match again. Filling is idempotent: a second call finds
    /// its slots taken and returns `NoOpenSlot`.
    pub fn advance(&self, match_id: MatchId) -> Result<AdvancementOutcome, TournamentError> {
        let tournament_id = self.load_match(match_id)?.tournament_id;
        let lock = self.tournament_lock(tournament_id)?;
        let _guard = lock.lock().map_err(lock_error)?;

        let tournament = self.load_tournament(tournament_id)?;
        let game = self.load_match(match_id)?;
        self.advance_locked(&tournament, &game)
    }

    /// Caller holds the tournament lock.
    fn advance_locked(
        &self,
        tournament: &Tournament,
        completed: &Match,
    ) -> Result<AdvancementOutcome, TournamentError> {
        let mut candidates = self.store.matches_by_tournament(tournament.id)?;
        candidates.retain(|c| c.id != completed.id);

        let outcome = logic::advance(tournament.format, completed, &mut candidates)?;
        if let AdvancementOutcome::Advanced(fills) = &outcome {
            for fill in fills {
                let Some(game) = candidates.iter().find(|c| c.id == fill.match_id) else {
                    continue;
                };
                self.store.update_match(game)?;
                self.notifier.notify(Event::MatchUpdated {
                    game: game.clone(),
                    action: Action::Updated,
                });
            }
        }
        Ok(outcome)
    }

    pub fn progress(&self, id: TournamentId) -> Result<Progress, TournamentError> {
        self.load_tournament(id)?;
        Ok(logic::progress(&self.store.matches_by_tournament(id)?))
    }

    pub fn team_stats(&self, id: TournamentId) -> Result<Vec<TeamStats>, TournamentError> {
        self.load_tournament(id)?;
        Ok(logic::team_stats(&self.store.matches_by_tournament(id)?))
    }

    pub fn podium(&self, id: TournamentId) -> Result<Podium, TournamentError> {
        self.load_tournament(id)?;
        Ok(logic::podium(&self.store.matches_by_tournament(id)?))
    }

    /// Mark the tournament completed. Only allowed once every match has a result.
    pub fn complete_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let lock = self.tournament_lock(id)?;
        let _guard = lock.lock().map_err(lock_error)?;

        let mut tournament = self.load_tournament(id)?;
        let matches = self.store.matches_by_tournament(id)?;
        tournament.complete(logic::can_complete(&matches))?;
        self.store.update_tournament(&tournament)?;

        log::info!(
            "Tournament {} completed, champion: {}",
            id,
            logic::champion(&matches).as_deref().unwrap_or("-")
        );
        self.notifier.notify(Event::TournamentUpdated {
            tournament: tournament.clone(),
            action: Action::StatusChanged,
        });
        Ok(tournament)
    }

    /// Delete a tournament. Refused while it still has matches.
    pub fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError> {
        let lock = self.tournament_lock(id)?;
        {
            let _guard = lock.lock().map_err(lock_error)?;
            self.load_tournament(id)?;
            let count = self.store.count_matches(id)?;
            if count > 0 {
                return Err(TournamentError::TournamentHasMatches { id, count });
            }
            self.store.delete_tournament(id)?;
        }
        self.locks.lock().map_err(lock_error)?.remove(&id);
        log::info!("Deleted tournament {}", id);
        Ok(())
    }
}
