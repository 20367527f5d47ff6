//! Advancement: move the teams of a completed match into their next slots.

use crate::logic::rules;
use crate::models::{Format, Match, MatchId, Round, Side, Slot, TournamentError};
use serde::{Deserialize, Serialize};

/// Whether a fill carried the winner or the loser of the source match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Winner,
    Loser,
}

/// One placeholder slot replaced by a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotFill {
    pub match_id: MatchId,
    pub round: Round,
    pub side: Side,
    pub team: String,
    pub placement: Placement,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancementOutcome {
    /// The match leads nowhere (final, third place).
    Terminal,
    /// At least one slot was filled.
    Advanced(Vec<SlotFill>),
    /// There is a next round but no open slot for the team. Not an error for the caller.
    NoOpenSlot(Round),
}

#[derive(Clone, Copy, Debug)]
enum Destination {
    /// Slot recorded on the match at generation time.
    Edge(Slot),
    /// No edge stored: first open slot of the round, in bracket order.
    Scan(Round),
}

fn destinations(format: Format, m: &Match) -> Vec<(Destination, Placement)> {
    let winner = match (m.winner_to, rules::next_round(m.round, format)) {
        (Some(slot), _) => Some(Destination::Edge(slot)),
        (None, Some(round)) => Some(Destination::Scan(round)),
        (None, None) => None,
    };
    let loser = match (m.loser_to, rules::loser_round(m.round, format)) {
        (Some(slot), _) => Some(Destination::Edge(slot)),
        (None, Some(round)) => Some(Destination::Scan(round)),
        (None, None) => None,
    };
    winner
        .map(|d| (d, Placement::Winner))
        .into_iter()
        .chain(loser.map(|d| (d, Placement::Loser)))
        .collect()
}

/// Put `team` into `destination`. `Err` carries the round that had no room.
fn place(
    destination: Destination,
    team: &str,
    placement: Placement,
    fallback_round: Round,
    candidates: &mut [Match],
) -> Result<SlotFill, Round> {
    match destination {
        Destination::Edge(slot) => {
            let target = candidates
                .iter_mut()
                .find(|c| c.id == slot.match_id)
                .ok_or(fallback_round)?;
            if !target.fill(slot.side, team) {
                return Err(target.round);
            }
            Ok(SlotFill {
                match_id: target.id,
                round: target.round,
                side: slot.side,
                team: team.to_string(),
                placement,
            })
        }
        Destination::Scan(round) => {
            // Already placed by an earlier call: never fill a second slot.
            if candidates
                .iter()
                .any(|c| c.round == round && c.has_team(team))
            {
                return Err(round);
            }
            let (target, side) = candidates
                .iter_mut()
                .filter(|c| c.round == round)
                .find_map(|c| {
                    let side = c.open_side()?;
                    Some((c, side))
                })
                .ok_or(round)?;
            target.fill(side, team);
            Ok(SlotFill {
                match_id: target.id,
                round,
                side,
                team: team.to_string(),
                placement,
            })
        }
    }
}

/// Advance the teams of `completed` into `candidates` (the tournament's other matches,
/// in bracket order). Filled matches are updated in place; persisting them is up to
/// the caller.
pub fn advance(
    format: Format,
    completed: &Match,
    candidates: &mut [Match],
) -> Result<AdvancementOutcome, TournamentError> {
    let (Some(winner), Some(loser)) = (completed.winner.as_deref(), completed.loser()) else {
        return Err(TournamentError::Validation(format!(
            "match {} has no result to advance",
            completed.id
        )));
    };

    let destinations = destinations(format, completed);
    if destinations.is_empty() {
        return Ok(AdvancementOutcome::Terminal);
    }

    let fallback_round = rules::next_round(completed.round, format).unwrap_or(completed.round);
    let mut fills = Vec::new();
    let mut missed = Vec::new();
    for (destination, placement) in destinations {
        let team = match placement {
            Placement::Winner => winner,
            Placement::Loser => loser,
        };
        match place(destination, team, placement, fallback_round, candidates) {
            Ok(fill) => {
                log::debug!(
                    "{} {:?} of match {} -> {} {} side {:?}",
                    fill.team,
                    placement,
                    completed.id,
                    fill.round,
                    fill.match_id,
                    fill.side
                );
                fills.push(fill);
            }
            Err(round) => {
                log::warn!(
                    "No open {} slot for {} ({:?} of match {})",
                    round,
                    team,
                    placement,
                    completed.id
                );
                missed.push(round);
            }
        }
    }

    Ok(match (fills.is_empty(), missed.first()) {
        (false, _) => AdvancementOutcome::Advanced(fills),
        (true, Some(&round)) => AdvancementOutcome::NoOpenSlot(round),
        (true, None) => AdvancementOutcome::Terminal,
    })
}
