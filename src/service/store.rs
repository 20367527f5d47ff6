//! Persistence seam for tournaments and matches.

use crate::models::{Match, MatchId, Round, Sport, Tournament, TournamentError, TournamentId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Storage the service reads from and writes through.
///
/// Matches of a tournament must come back in the order they were inserted (bracket
/// order); the first-open-slot fallback of advancement depends on it.
pub trait TournamentStore: Send + Sync {
    fn insert_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError>;

    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError>;

    /// All tournaments, oldest first.
    fn tournaments(&self) -> Result<Vec<Tournament>, TournamentError>;

    fn update_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError>;

    fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError>;

    /// The active tournament of `sport`, if any.
    fn active_tournament(&self, sport: Sport) -> Result<Option<Tournament>, TournamentError> {
        Ok(self
            .tournaments()?
            .into_iter()
            .find(|t| t.sport == sport && t.is_active()))
    }

    fn insert_matches(&self, matches: &[Match]) -> Result<(), TournamentError>;

    fn get_match(&self, id: MatchId) -> Result<Option<Match>, TournamentError>;

    fn update_match(&self, m: &Match) -> Result<(), TournamentError>;

    /// Matches of a tournament in bracket order.
    fn matches_by_tournament(&self, id: TournamentId) -> Result<Vec<Match>, TournamentError>;

    fn matches_by_round(
        &self,
        id: TournamentId,
        round: Round,
    ) -> Result<Vec<Match>, TournamentError> {
        let mut matches = self.matches_by_tournament(id)?;
        matches.retain(|m| m.round == round);
        Ok(matches)
    }

    fn count_matches(&self, id: TournamentId) -> Result<usize, TournamentError> {
        Ok(self.matches_by_tournament(id)?.len())
    }
}

#[derive(Debug, Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    /// Insertion order of tournaments.
    tournament_order: Vec<TournamentId>,
    matches: HashMap<MatchId, Match>,
    /// Insertion order of each tournament's matches.
    match_order: HashMap<TournamentId, Vec<MatchId>>,
}

/// Simple in-memory store for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(_: PoisonError<T>) -> TournamentError {
    TournamentError::Storage("lock error".into())
}

impl TournamentStore for InMemoryStore {
    fn insert_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        let mut g = self.tables.write().map_err(lock_error)?;
        if g.tournaments.contains_key(&tournament.id) {
            return Err(TournamentError::Storage(format!(
                "tournament {} already stored",
                tournament.id
            )));
        }
        g.tournament_order.push(tournament.id);
        g.tournaments.insert(tournament.id, tournament.clone());
        Ok(())
    }

    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        let g = self.tables.read().map_err(lock_error)?;
        Ok(g.tournaments.get(&id).cloned())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        let g = self.tables.read().map_err(lock_error)?;
        Ok(g.tournament_order
            .iter()
            .filter_map(|id| g.tournaments.get(id).cloned())
            .collect())
    }

    fn update_tournament(&self, tournament: &Tournament) -> Result<(), TournamentError> {
        let mut g = self.tables.write().map_err(lock_error)?;
        let stored = g
            .tournaments
            .get_mut(&tournament.id)
            .ok_or(TournamentError::TournamentNotFound(tournament.id))?;
        *stored = tournament.clone();
        Ok(())
    }

    fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError> {
        let mut g = self.tables.write().map_err(lock_error)?;
        if g.tournaments.remove(&id).is_none() {
            return Err(TournamentError::TournamentNotFound(id));
        }
        g.tournament_order.retain(|t| *t != id);
        for match_id in g.match_order.remove(&id).unwrap_or_default() {
            g.matches.remove(&match_id);
        }
        Ok(())
    }

    fn insert_matches(&self, matches: &[Match]) -> Result<(), TournamentError> {
        let mut g = self.tables.write().map_err(lock_error)?;
        for m in matches {
            if !g.tournaments.contains_key(&m.tournament_id) {
                return Err(TournamentError::TournamentNotFound(m.tournament_id));
            }
        }
        for m in matches {
            g.match_order.entry(m.tournament_id).or_default().push(m.id);
            g.matches.insert(m.id, m.clone());
        }
        Ok(())
    }

    fn get_match(&self, id: MatchId) -> Result<Option<Match>, TournamentError> {
        let g = self.tables.read().map_err(lock_error)?;
        Ok(g.matches.get(&id).cloned())
    }

    fn update_match(&self, m: &Match) -> Result<(), TournamentError> {
        let mut g = self.tables.write().map_err(lock_error)?;
        let stored = g
            .matches
            .get_mut(&m.id)
            .ok_or(TournamentError::MatchNotFound(m.id))?;
        *stored = m.clone();
        Ok(())
    }

    fn matches_by_tournament(&self, id: TournamentId) -> Result<Vec<Match>, TournamentError> {
        let g = self.tables.read().map_err(lock_error)?;
        Ok(g.match_order
            .get(&id)
            .map(|ids| ids.iter().filter_map(|m| g.matches.get(m).cloned()).collect())
            .unwrap_or_default())
    }
}
