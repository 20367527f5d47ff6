//! Result validation: a submitted score line is accepted whole or not at all.

use crate::logic::rules;
use crate::models::{Match, ProposedResult, RuleViolation, Sport, PLACEHOLDER};

/// Check `result` against the match state and the sport's rules.
///
/// In order: the match is still pending, the winner is one of its teams, both
/// scores are in range, the scores differ, and the winner has the higher score.
pub fn validate(sport: Sport, m: &Match, result: &ProposedResult) -> Result<(), RuleViolation> {
    if m.is_completed() {
        return Err(RuleViolation::AlreadyCompleted);
    }

    if result.winner == PLACEHOLDER || !m.has_team(&result.winner) {
        return Err(RuleViolation::InvalidWinner {
            winner: result.winner.clone(),
        });
    }

    let (min, max) = rules::score_range(sport);
    for score in [result.score1, result.score2] {
        if !(min..=max).contains(&score) {
            return Err(RuleViolation::ScoreRange { score, min, max });
        }
    }

    if result.score1 == result.score2 {
        return Err(RuleViolation::DrawNotAllowed);
    }

    let higher = if result.score1 > result.score2 {
        &m.team1
    } else {
        &m.team2
    };
    if *higher != result.winner {
        return Err(RuleViolation::ScoreWinnerMismatch {
            winner: result.winner.clone(),
        });
    }

    Ok(())
}
