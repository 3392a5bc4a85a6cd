//! Rotation engine: selection, team building, court lifecycle, rotation.

mod courts;
mod roster;
mod rotation;
mod selection;
mod setup;
mod teams;

pub use courts::{
    auto_fill_empty_courts, fill_opponents, finish_match, rematch, shuffle_teams, start_match,
    submit_score, swap_player, update_score, Finish,
};
pub use roster::{add_player, remove_player};
pub use rotation::RotationPlan;
pub use selection::{is_safe_group, pick_four, MAX_TIER_SPREAD};
pub use setup::{reset_session, start_session};
pub use teams::random_split;
