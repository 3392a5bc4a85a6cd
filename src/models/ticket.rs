//! PlayerTicket and SkillTier.

use crate::models::settings::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported skill level. Declaration order is the skill ordering.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillTier {
    Beginner,
    Novice,
    Intermediate,
}

impl SkillTier {
    pub const ALL: [SkillTier; 3] = [SkillTier::Beginner, SkillTier::Novice, SkillTier::Intermediate];

    /// Position in the skill ordering (0 = lowest).
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillTier::Beginner => "BEGINNER",
            SkillTier::Novice => "NOVICE",
            SkillTier::Intermediate => "INTERMEDIATE",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillTier::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("skill tier", s))
    }
}

/// One player waiting in line or playing on a court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerTicket {
    pub name: String,
    pub skill: SkillTier,
    /// Opaque rating-system id (e.g. DUPR). Carried through, never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl PlayerTicket {
    pub fn new(name: impl Into<String>, skill: SkillTier) -> Self {
        Self {
            name: name.into(),
            skill,
            external_id: None,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Names are unique per session, compared trimmed and case-insensitively.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
