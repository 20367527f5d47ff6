//! Bracket: read-only view of a tournament's matches grouped by round.

use crate::models::game::Match;
use crate::models::sport::{Format, Round, Sport};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Matches of one round, in bracket order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub round: Round,
    pub matches: Vec<Match>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub tournament_id: TournamentId,
    pub sport: Sport,
    pub format: Format,
    /// Canonical round order; rounds without matches are left out.
    pub rounds: Vec<BracketRound>,
}

impl Bracket {
    /// Group `matches` by round in canonical order, keeping their order within a round.
    pub fn from_matches(
        tournament_id: TournamentId,
        sport: Sport,
        format: Format,
        matches: Vec<Match>,
    ) -> Self {
        let mut rounds: Vec<BracketRound> = Round::ALL
            .into_iter()
            .map(|round| BracketRound {
                round,
                matches: Vec::new(),
            })
            .collect();
        for m in matches {
            // Round::ALL is in declaration order, so the discriminant is the index.
            rounds[m.round as usize].matches.push(m);
        }
        rounds.retain(|r| !r.matches.is_empty());
        Self {
            tournament_id,
            sport,
            format,
            rounds,
        }
    }

    pub fn round(&self, round: Round) -> Option<&[Match]> {
        self.rounds
            .iter()
            .find(|r| r.round == round)
            .map(|r| r.matches.as_slice())
    }

    pub fn round_names(&self) -> Vec<Round> {
        self.rounds.iter().map(|r| r.round).collect()
    }

    /// All matches in canonical round order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.rounds.into_iter().flat_map(|r| r.matches).collect()
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }
}
