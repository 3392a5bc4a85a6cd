//! MatchResult: what a finished match reports to the stats and history sinks.

use crate::models::court::{CourtId, Pairing, TeamSide, TEAM_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a finished match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    TeamA,
    TeamB,
    Draw,
}

impl MatchWinner {
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => MatchWinner::TeamA,
            std::cmp::Ordering::Less => MatchWinner::TeamB,
            std::cmp::Ordering::Equal => MatchWinner::Draw,
        }
    }

    pub fn side(self) -> Option<TeamSide> {
        match self {
            MatchWinner::TeamA => Some(TeamSide::A),
            MatchWinner::TeamB => Some(TeamSide::B),
            MatchWinner::Draw => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchWinner::TeamA => "Team A",
            MatchWinner::TeamB => "Team B",
            MatchWinner::Draw => "DRAW",
        }
    }
}

impl From<TeamSide> for MatchWinner {
    fn from(side: TeamSide) -> Self {
        match side {
            TeamSide::A => MatchWinner::TeamA,
            TeamSide::B => MatchWinner::TeamB,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub court: CourtId,
    pub team_a: [String; TEAM_SIZE],
    pub team_b: [String; TEAM_SIZE],
    pub score_a: u32,
    pub score_b: u32,
    pub winner: MatchWinner,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn new(
        court: CourtId,
        pairing: &Pairing,
        (score_a, score_b): (u32, u32),
        winner: MatchWinner,
        started_at: Option<DateTime<Utc>>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            court,
            team_a: pairing.team_a.clone().map(|p| p.name),
            team_b: pairing.team_b.clone().map(|p| p.name),
            score_a,
            score_b,
            winner,
            started_at,
            ended_at,
        }
    }

    /// Names on the winning team; empty for a draw.
    pub fn winners(&self) -> &[String] {
        match self.winner {
            MatchWinner::TeamA => &self.team_a,
            MatchWinner::TeamB => &self.team_b,
            MatchWinner::Draw => &[],
        }
    }

    /// Names on the losing team; empty for a draw.
    pub fn losers(&self) -> &[String] {
        match self.winner {
            MatchWinner::TeamA => &self.team_b,
            MatchWinner::TeamB => &self.team_a,
            MatchWinner::Draw => &[],
        }
    }

    /// Everyone who played, team A first.
    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Minutes on court rounded to two decimals; 0 when the start time is unknown.
    pub fn duration_minutes(&self) -> f64 {
        match self.started_at {
            Some(start) => {
                let secs = (self.ended_at - start).num_milliseconds() as f64 / 1000.0;
                (secs / 60.0 * 100.0).round() / 100.0
            }
            None => 0.0,
        }
    }
}
