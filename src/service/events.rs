//! Change notifications fired after every successful mutation.

use crate::models::{Match, Tournament};
use serde::{Deserialize, Serialize};

/// What happened to the entity carried by an [`Event`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Updated,
    ResultUpdated,
    StatusChanged,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TournamentUpdated {
        tournament: Tournament,
        action: Action,
    },
    MatchUpdated {
        #[serde(rename = "match")]
        game: Match,
        action: Action,
    },
    MatchResult {
        #[serde(rename = "match")]
        game: Match,
        action: Action,
    },
}

/// Receives events. Delivery and fan-out are the implementor's business.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

/// Writes every event to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match &event {
            Event::TournamentUpdated { tournament, action } => {
                log::info!("tournament {} {:?} ({:?})", tournament.id, action, tournament.status)
            }
            Event::MatchUpdated { game, action } => log::debug!(
                "match {} {:?}: {} {} vs {}",
                game.id,
                action,
                game.round,
                game.team1,
                game.team2
            ),
            Event::MatchResult { game, .. } => log::info!(
                "result {} {} {}-{} {}, winner {}",
                game.round,
                game.team1,
                game.score1.unwrap_or_default(),
                game.score2.unwrap_or_default(),
                game.team2,
                game.winner.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _event: Event) {}
}
