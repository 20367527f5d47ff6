//! Tournament business logic: rules, bracket generation, result validation, advancement, progress.

mod advancement;
mod bracket;
mod progress;
pub mod rules;
mod validation;

pub use advancement::{advance, AdvancementOutcome, Placement, SlotFill};
pub use bracket::{generate, Layout};
pub use progress::{
    can_complete, champion, current_round, podium, progress, team_stats, Podium, Progress,
};
pub use validation::validate;
