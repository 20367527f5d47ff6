//! Sport, Format, and Round: the closed sets every tournament is built from.

use crate::models::error::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sports the engine knows how to run.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Volleyball,
    TableTennis,
    Soccer,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Volleyball, Sport::TableTennis, Sport::Soccer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Volleyball => "volleyball",
            Sport::TableTennis => "table_tennis",
            Sport::Soccer => "soccer",
        }
    }
}

/// Bracket variant. `Rainy` adds a loser bracket and is only offered for table tennis.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Standard,
    Rainy,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Rainy => "rainy",
        }
    }
}

/// Named stage of the bracket.
///
/// Declaration order is the canonical order used for grouping, scheduling and
/// for picking the current round, so `Ord` is derived on purpose.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    FirstRound,
    Quarterfinal,
    Semifinal,
    LoserBracket,
    ThirdPlace,
    Final,
}

impl Round {
    /// Every round in canonical order.
    pub const ALL: [Round; 6] = [
        Round::FirstRound,
        Round::Quarterfinal,
        Round::Semifinal,
        Round::LoserBracket,
        Round::ThirdPlace,
        Round::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::FirstRound => "first_round",
            Round::Quarterfinal => "quarterfinal",
            Round::Semifinal => "semifinal",
            Round::LoserBracket => "loser_bracket",
            Round::ThirdPlace => "third_place",
            Round::Final => "final",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s.trim())
            .ok_or_else(|| TournamentError::UnknownValue {
                kind: "sport",
                value: s.to_string(),
            })
    }
}

impl FromStr for Format {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "standard" => Ok(Format::Standard),
            "rainy" => Ok(Format::Rainy),
            other => Err(TournamentError::UnknownValue {
                kind: "format",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Round {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Round::ALL
            .into_iter()
            .find(|round| round.as_str() == s.trim())
            .ok_or_else(|| TournamentError::UnknownValue {
                kind: "round",
                value: s.to_string(),
            })
    }
}
