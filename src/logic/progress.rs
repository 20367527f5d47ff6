//! Progress tracking: completion, current round, standings, and the podium.

use crate::models::{Match, Round, TeamStats, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of how far a tournament has come.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total_matches: usize,
    pub completed_matches: usize,
    pub pending_matches: usize,
    /// Percentage, 0 to 100. Zero when there are no matches.
    pub completion_rate: f64,
    /// Earliest round with a pending match, or the last round once everything is played.
    pub current_round: Option<Round>,
    pub can_complete: bool,
    pub champion: Option<String>,
}

/// Final standings of a finished bracket.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Podium {
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub third_place: Option<String>,
}

pub fn progress(matches: &[Match]) -> Progress {
    let total_matches = matches.len();
    let completed_matches = matches.iter().filter(|m| m.is_completed()).count();
    let completion_rate = if total_matches == 0 {
        0.0
    } else {
        completed_matches as f64 / total_matches as f64 * 100.0
    };
    Progress {
        total_matches,
        completed_matches,
        pending_matches: total_matches - completed_matches,
        completion_rate,
        current_round: current_round(matches),
        can_complete: can_complete(matches),
        champion: champion(matches),
    }
}

pub fn current_round(matches: &[Match]) -> Option<Round> {
    matches
        .iter()
        .filter(|m| !m.is_completed())
        .map(|m| m.round)
        .min()
        .or_else(|| matches.iter().map(|m| m.round).max())
}

/// True iff there is at least one match and every match has a result.
pub fn can_complete(matches: &[Match]) -> bool {
    !matches.is_empty() && matches.iter().all(Match::is_completed)
}

fn winner_of(matches: &[Match], round: Round) -> Option<&Match> {
    matches
        .iter()
        .find(|m| m.round == round && m.is_completed())
}

/// Winner of the final, once it has been played.
pub fn champion(matches: &[Match]) -> Option<String> {
    winner_of(matches, Round::Final).and_then(|m| m.winner.clone())
}

pub fn podium(matches: &[Match]) -> Podium {
    let final_match = winner_of(matches, Round::Final);
    Podium {
        champion: final_match.and_then(|m| m.winner.clone()),
        runner_up: final_match.and_then(|m| m.loser().map(str::to_string)),
        third_place: winner_of(matches, Round::ThirdPlace).and_then(|m| m.winner.clone()),
    }
}

/// Per-team record over all completed matches.
///
/// Sorted by wins (descending), then losses (ascending), then point difference
/// (descending), then name. A team counts as eliminated when it lost a match whose
/// loser is not sent anywhere.
pub fn team_stats(matches: &[Match]) -> Vec<TeamStats> {
    let mut stats: HashMap<&str, TeamStats> = HashMap::new();
    for m in matches {
        for team in [m.team1.as_str(), m.team2.as_str()] {
            if team != PLACEHOLDER {
                stats.entry(team).or_insert_with(|| TeamStats::new(team));
            }
        }
    }

    for m in matches.iter().filter(|m| m.is_completed()) {
        let (Some(winner), Some(loser), Some(score1), Some(score2)) =
            (m.winner.as_deref(), m.loser(), m.score1, m.score2)
        else {
            continue;
        };
        let (winner_score, loser_score) = if winner == m.team1 {
            (score1, score2)
        } else {
            (score2, score1)
        };
        if let Some(s) = stats.get_mut(winner) {
            s.add_win(winner_score, loser_score);
        }
        if let Some(s) = stats.get_mut(loser) {
            s.add_loss(loser_score, winner_score);
            if m.loser_to.is_none() {
                s.eliminated = true;
            }
        }
    }

    let mut stats: Vec<TeamStats> = stats.into_values().collect();
    stats.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then(b.point_difference().cmp(&a.point_difference()))
            .then(a.team.cmp(&b.team))
    });
    stats
}
