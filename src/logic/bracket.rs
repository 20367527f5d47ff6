//! Bracket generation: first-round pairings, placeholder rounds, edges and schedule.
//!
//! Teams are paired in submission order (0 vs 1, 2 vs 3, ...). There is no seeding.
//! Every later match starts as `TBD` vs `TBD`. The layout is built as an arena of
//! nodes addressed by index, each carrying where its winner (and for some rounds its
//! loser) goes next; the arena is then turned into `Match` records with those edges
//! resolved to match ids.

use crate::logic::rules;
use crate::models::{
    Bracket, Format, Match, Round, Side, Slot, Sport, TournamentError, TournamentId, PLACEHOLDER,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Bracket shape. One per distinct layout, picked by format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Layout {
    /// first_round, quarterfinal, semifinal, third_place, final.
    Standard,
    /// Standard plus a loser bracket for first-round losers that feeds third place.
    Rainy,
}

impl Layout {
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::Standard => Layout::Standard,
            Format::Rainy => Layout::Rainy,
        }
    }

    /// Team counts this layout can place without leaving a slot unreachable.
    pub fn supported_team_counts(self) -> &'static [usize] {
        match self {
            Layout::Standard => &[8, 16],
            Layout::Rainy => &[8],
        }
    }

    /// Match count per round for `team_count` teams.
    fn round_size(self, round: Round, team_count: usize) -> usize {
        let first_round = team_count / 2;
        match round {
            Round::FirstRound => first_round,
            Round::Quarterfinal => first_round / 2,
            Round::Semifinal => 2,
            Round::LoserBracket => match self {
                Layout::Rainy => first_round / 2,
                Layout::Standard => 0,
            },
            Round::ThirdPlace | Round::Final => 1,
        }
    }
}

/// Arena node: a match-to-be with index-based edges.
#[derive(Clone, Debug)]
struct Node {
    round: Round,
    team1: String,
    team2: String,
    winner_to: Option<(usize, Side)>,
    loser_to: Option<(usize, Side)>,
}

/// Index of every round's first node and its size.
struct Arena {
    nodes: Vec<Node>,
    spans: Vec<(Round, usize, usize)>,
}

impl Arena {
    fn new(layout: Layout, rounds: &[Round], teams: &[String]) -> Self {
        let mut nodes = Vec::new();
        let mut spans = Vec::new();
        for &round in rounds {
            let size = layout.round_size(round, teams.len());
            spans.push((round, nodes.len(), size));
            for i in 0..size {
                let (team1, team2) = if round == Round::FirstRound {
                    (teams[2 * i].clone(), teams[2 * i + 1].clone())
                } else {
                    (PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
                };
                nodes.push(Node {
                    round,
                    team1,
                    team2,
                    winner_to: None,
                    loser_to: None,
                });
            }
        }
        Self { nodes, spans }
    }

    fn size(&self, round: Round) -> usize {
        self.spans
            .iter()
            .find(|(r, _, _)| *r == round)
            .map_or(0, |&(_, _, size)| size)
    }

    /// Arena index of the `i`-th match of `round`.
    fn index(&self, round: Round, i: usize) -> Option<usize> {
        self.spans
            .iter()
            .find(|(r, _, size)| *r == round && i < *size)
            .map(|&(_, start, _)| start + i)
    }

    fn link_winner(&mut self, from: (Round, usize), to: (Round, usize), side: Side) {
        if let (Some(a), Some(b)) = (self.index(from.0, from.1), self.index(to.0, to.1)) {
            self.nodes[a].winner_to = Some((b, side));
        }
    }

    fn link_loser(&mut self, from: (Round, usize), to: (Round, usize), side: Side) {
        if let (Some(a), Some(b)) = (self.index(from.0, from.1), self.index(to.0, to.1)) {
            self.nodes[a].loser_to = Some((b, side));
        }
    }

    fn link(&mut self, layout: Layout) {
        for i in 0..self.size(Round::FirstRound) {
            self.link_winner((Round::FirstRound, i), (Round::Quarterfinal, i / 2), Side::from_parity(i));
            if layout == Layout::Rainy {
                self.link_loser((Round::FirstRound, i), (Round::LoserBracket, i / 2), Side::from_parity(i));
            }
        }

        // Same order the first-open-slot scan fills in. With two quarterfinals
        // (8 teams) both winners meet in the first semifinal and the second one
        // has no feeder.
        for j in 0..self.size(Round::Quarterfinal) {
            self.link_winner((Round::Quarterfinal, j), (Round::Semifinal, j / 2), Side::from_parity(j));
        }

        for k in 0..self.size(Round::Semifinal) {
            self.link_winner((Round::Semifinal, k), (Round::Final, 0), Side::from_parity(k));
            if layout == Layout::Standard {
                self.link_loser((Round::Semifinal, k), (Round::ThirdPlace, 0), Side::from_parity(k));
            }
        }

        for m in 0..self.size(Round::LoserBracket) {
            self.link_winner((Round::LoserBracket, m), (Round::ThirdPlace, 0), Side::from_parity(m));
        }
    }

    fn into_matches(
        self,
        tournament_id: TournamentId,
        sport: Sport,
        start: DateTime<Utc>,
    ) -> Vec<Match> {
        let spacing = rules::match_spacing(sport);
        let mut matches: Vec<Match> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let scheduled_at = start + spacing * i as i32;
                Match::new(
                    tournament_id,
                    node.round,
                    node.team1.clone(),
                    node.team2.clone(),
                    scheduled_at,
                )
            })
            .collect();
        let ids: Vec<_> = matches.iter().map(|m| m.id).collect();
        for (m, node) in matches.iter_mut().zip(&self.nodes) {
            m.winner_to = node.winner_to.map(|(i, side)| Slot {
                match_id: ids[i],
                side,
            });
            m.loser_to = node.loser_to.map(|(i, side)| Slot {
                match_id: ids[i],
                side,
            });
        }
        matches
    }
}

/// Check team names: non-blank, not the placeholder, unique. Returns them trimmed.
fn normalize_teams(teams: &[String]) -> Result<Vec<String>, TournamentError> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(teams.len());
    for team in teams {
        let name = team.trim();
        if name.is_empty() {
            return Err(TournamentError::Validation("team names must not be empty".into()));
        }
        if name.eq_ignore_ascii_case(PLACEHOLDER) {
            return Err(TournamentError::Validation(format!(
                "{PLACEHOLDER:?} is reserved and cannot be used as a team name"
            )));
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(TournamentError::Validation(format!("duplicate team {name:?}")));
        }
        normalized.push(name.to_string());
    }
    Ok(normalized)
}

/// Build the full bracket for a tournament.
///
/// 1. Reject an unsupported format, too few teams, or a size the layout cannot place.
/// 2. Pair consecutive teams into first-round matches in the given order.
/// 3. Add `TBD` matches for every later round of the layout and link them.
/// 4. Schedule every match `spacing(sport)` after the previous one, starting at `start`.
pub fn generate(
    tournament_id: TournamentId,
    sport: Sport,
    format: Format,
    teams: &[String],
    start: DateTime<Utc>,
) -> Result<Bracket, TournamentError> {
    let rounds = rules::valid_rounds(sport, format)?;

    let required = rules::minimum_teams(sport);
    if teams.len() < required {
        return Err(TournamentError::NotEnoughTeams {
            sport,
            required,
            actual: teams.len(),
        });
    }

    let layout = Layout::for_format(format);
    let supported = layout.supported_team_counts();
    if teams.len() > rules::maximum_teams(sport) || !supported.contains(&teams.len()) {
        return Err(TournamentError::Validation(format!(
            "a {format} {sport} bracket takes {supported:?} teams (got {})",
            teams.len()
        )));
    }

    let teams = normalize_teams(teams)?;

    let mut arena = Arena::new(layout, rounds, &teams);
    arena.link(layout);
    let matches = arena.into_matches(tournament_id, sport, start);

    log::debug!(
        "Generated {} {} bracket for tournament {} ({} matches)",
        format,
        sport,
        tournament_id,
        matches.len()
    );
    Ok(Bracket::from_matches(tournament_id, sport, format, matches))
}
