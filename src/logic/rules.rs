//! Rule table: per-sport constants and the round progression map.
//!
//! Everything sport-specific lives here. Adding a sport means adding a `SportRules`
//! entry and an arm in [`rules`]; the generator, validator and advancement code
//! only ever ask this module.

use crate::models::{Format, Round, Sport, TournamentError};
use chrono::Duration;

/// Constants for one sport.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SportRules {
    pub sport: Sport,
    pub minimum_teams: usize,
    pub maximum_teams: usize,
    /// Inclusive range a single score must fall in.
    pub score_range: (i32, i32),
    /// Gap between consecutive scheduled matches.
    pub match_spacing_minutes: i64,
    pub formats: &'static [Format],
}

const VOLLEYBALL: SportRules = SportRules {
    sport: Sport::Volleyball,
    minimum_teams: 8,
    maximum_teams: 16,
    score_range: (0, 25),
    match_spacing_minutes: 30,
    formats: &[Format::Standard],
};

const TABLE_TENNIS: SportRules = SportRules {
    sport: Sport::TableTennis,
    minimum_teams: 8,
    maximum_teams: 16,
    score_range: (0, 11),
    match_spacing_minutes: 20,
    formats: &[Format::Standard, Format::Rainy],
};

const SOCCER: SportRules = SportRules {
    sport: Sport::Soccer,
    minimum_teams: 8,
    maximum_teams: 16,
    score_range: (0, 20),
    match_spacing_minutes: 45,
    formats: &[Format::Standard],
};

const STANDARD_ROUNDS: &[Round] = &[
    Round::FirstRound,
    Round::Quarterfinal,
    Round::Semifinal,
    Round::ThirdPlace,
    Round::Final,
];

const RAINY_ROUNDS: &[Round] = &[
    Round::FirstRound,
    Round::Quarterfinal,
    Round::Semifinal,
    Round::LoserBracket,
    Round::ThirdPlace,
    Round::Final,
];

pub fn rules(sport: Sport) -> &'static SportRules {
    match sport {
        Sport::Volleyball => &VOLLEYBALL,
        Sport::TableTennis => &TABLE_TENNIS,
        Sport::Soccer => &SOCCER,
    }
}

pub fn minimum_teams(sport: Sport) -> usize {
    rules(sport).minimum_teams
}

pub fn maximum_teams(sport: Sport) -> usize {
    rules(sport).maximum_teams
}

/// Inclusive `(min, max)` for a single score.
pub fn score_range(sport: Sport) -> (i32, i32) {
    rules(sport).score_range
}

pub fn match_spacing(sport: Sport) -> Duration {
    Duration::minutes(rules(sport).match_spacing_minutes)
}

pub fn format_allowed(sport: Sport, format: Format) -> bool {
    rules(sport).formats.contains(&format)
}

/// Rounds a bracket of this sport and format is made of, in canonical order.
pub fn valid_rounds(sport: Sport, format: Format) -> Result<&'static [Round], TournamentError> {
    if !format_allowed(sport, format) {
        return Err(TournamentError::InvalidFormat { sport, format });
    }
    Ok(match format {
        Format::Standard => STANDARD_ROUNDS,
        Format::Rainy => RAINY_ROUNDS,
    })
}

/// Round the winner of `round` moves on to. `None` ends advancement.
pub fn next_round(round: Round, format: Format) -> Option<Round> {
    match (round, format) {
        (Round::FirstRound, _) => Some(Round::Quarterfinal),
        (Round::Quarterfinal, _) => Some(Round::Semifinal),
        (Round::Semifinal, _) => Some(Round::Final),
        (Round::LoserBracket, Format::Rainy) => Some(Round::ThirdPlace),
        (Round::LoserBracket, Format::Standard) => None,
        (Round::ThirdPlace, _) | (Round::Final, _) => None,
    }
}

/// Round the loser of `round` drops into, if losing there is not elimination.
pub fn loser_round(round: Round, format: Format) -> Option<Round> {
    match (round, format) {
        (Round::FirstRound, Format::Rainy) => Some(Round::LoserBracket),
        (Round::Semifinal, Format::Standard) => Some(Round::ThirdPlace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sport_needs_eight_teams() {
        for sport in Sport::ALL {
            assert_eq!(minimum_teams(sport), 8);
        }
    }

    #[test]
    fn each_table_entry_belongs_to_its_sport() {
        for sport in Sport::ALL {
            assert_eq!(rules(sport).sport, sport);
        }
    }

    #[test]
    fn rainy_is_table_tennis_only() {
        assert!(valid_rounds(Sport::TableTennis, Format::Rainy).is_ok());
        assert_eq!(
            valid_rounds(Sport::Soccer, Format::Rainy),
            Err(TournamentError::InvalidFormat {
                sport: Sport::Soccer,
                format: Format::Rainy
            })
        );
    }

    #[test]
    fn progression_ends_at_final_and_third_place() {
        assert_eq!(next_round(Round::Semifinal, Format::Standard), Some(Round::Final));
        assert_eq!(next_round(Round::Final, Format::Rainy), None);
        assert_eq!(next_round(Round::ThirdPlace, Format::Standard), None);
        assert_eq!(
            next_round(Round::LoserBracket, Format::Rainy),
            Some(Round::ThirdPlace)
        );
        assert_eq!(
            loser_round(Round::Semifinal, Format::Standard),
            Some(Round::ThirdPlace)
        );
        assert_eq!(loser_round(Round::Semifinal, Format::Rainy), None);
    }
}
