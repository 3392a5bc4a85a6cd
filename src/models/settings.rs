//! Per-session policies. Chosen in Setup, fixed while the session runs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Smallest and largest number of courts a session can run.
pub const MIN_COURTS: u32 = 1;
pub const MAX_COURTS: u32 = 7;

/// A string did not name any variant of a settings enum.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// How the selector searches the waiting line for a safe group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Contiguous windows from the front of the line; keeps arrival order.
    #[default]
    SlidingWindow,
    /// Every subset in index order; finds more matches but reorders far-apart players.
    Exhaustive,
}

/// How a selected group of four is split into two teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSplit {
    #[default]
    Random,
    /// Strongest with weakest, middle two together.
    SkillBalanced,
}

/// Where finished players go when a match ends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Team A then team B to the back of the line, whatever the outcome.
    FifoPreserving,
    /// Winners then losers to the back of the line.
    #[default]
    WinnersFirst,
    /// Winners hold the court; losers go to the back of the line.
    WinnersStay,
}

/// Where a newly added player joins the waiting line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPosition {
    #[default]
    Back,
    Front,
}

macro_rules! settings_from_str {
    ($ty:ty, $kind:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(UnknownVariant::new($kind, s)),
                }
            }
        }
    };
}

settings_from_str!(SelectionStrategy, "selection strategy", {
    "sliding_window" => SelectionStrategy::SlidingWindow,
    "exhaustive" => SelectionStrategy::Exhaustive,
});

settings_from_str!(TeamSplit, "team split", {
    "random" => TeamSplit::Random,
    "skill_balanced" => TeamSplit::SkillBalanced,
});

settings_from_str!(RotationPolicy, "rotation policy", {
    "fifo_preserving" => RotationPolicy::FifoPreserving,
    "winners_first" => RotationPolicy::WinnersFirst,
    "winners_stay" => RotationPolicy::WinnersStay,
});

settings_from_str!(JoinPosition, "join position", {
    "back" => JoinPosition::Back,
    "front" => JoinPosition::Front,
});

/// Everything that is fixed for the lifetime of a running session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub court_count: u32,
    pub selection: SelectionStrategy,
    pub team_split: TeamSplit,
    pub rotation: RotationPolicy,
    pub join_position: JoinPosition,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            court_count: 2,
            selection: SelectionStrategy::default(),
            team_split: TeamSplit::default(),
            rotation: RotationPolicy::default(),
            join_position: JoinPosition::default(),
        }
    }
}

impl SessionSettings {
    /// Most players the configured courts can keep moving (2 courts: 16, 7 courts: 66).
    pub fn player_capacity(&self) -> usize {
        (self.court_count as usize * 10).saturating_sub(4)
    }
}
