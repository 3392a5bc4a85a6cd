//! Court, its occupancy state, and the two-team Pairing playing on it.

use crate::models::ticket::PlayerTicket;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Courts are numbered 1..=court_count.
pub type CourtId = u32;

/// Players per match.
pub const GROUP_SIZE: usize = 4;
/// Players per team.
pub const TEAM_SIZE: usize = 2;

pub type Team = [PlayerTicket; TEAM_SIZE];

/// One side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opposite(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

/// Two full teams of two.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub team_a: Team,
    pub team_b: Team,
}

impl Pairing {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self { team_a, team_b }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// Team A then team B.
    pub fn players(&self) -> impl Iterator<Item = &PlayerTicket> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players().any(|p| p.is_named(name))
    }

    /// Swap `incoming` into the slot held by `name`, returning the player taken out.
    pub fn replace(&mut self, name: &str, incoming: PlayerTicket) -> Option<PlayerTicket> {
        self.team_a
            .iter_mut()
            .chain(self.team_b.iter_mut())
            .find(|p| p.is_named(name))
            .map(|slot| std::mem::replace(slot, incoming))
    }

    /// (winners, losers) for the given winning side.
    pub fn split_by_winner(self, winner: TeamSide) -> (Team, Team) {
        match winner {
            TeamSide::A => (self.team_a, self.team_b),
            TeamSide::B => (self.team_b, self.team_a),
        }
    }

    /// All four players, team A first.
    pub fn into_group(self) -> [PlayerTicket; GROUP_SIZE] {
        let [a1, a2] = self.team_a;
        let [b1, b2] = self.team_b;
        [a1, a2, b1, b2]
    }
}

/// What a court is doing right now.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CourtState {
    #[default]
    Empty,
    InPlay { pairing: Pairing },
    /// Winners kept the court and wait for two challengers.
    AwaitingOpponent { holders: Team },
}

/// Running score of the match on a court.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub state: CourtState,
    pub score: Score,
    /// Set when a full match starts on this court.
    pub started_at: Option<DateTime<Utc>>,
}

impl Court {
    pub fn new(id: CourtId) -> Self {
        Self {
            id,
            state: CourtState::Empty,
            score: Score::default(),
            started_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, CourtState::Empty)
    }

    pub fn is_awaiting_opponent(&self) -> bool {
        matches!(self.state, CourtState::AwaitingOpponent { .. })
    }

    pub fn pairing(&self) -> Option<&Pairing> {
        match &self.state {
            CourtState::InPlay { pairing } => Some(pairing),
            _ => None,
        }
    }

    /// Everyone assigned to this court (0, 2 or 4 players).
    pub fn players(&self) -> Vec<&PlayerTicket> {
        match &self.state {
            CourtState::Empty => Vec::new(),
            CourtState::InPlay { pairing } => pairing.players().collect(),
            CourtState::AwaitingOpponent { holders } => holders.iter().collect(),
        }
    }

    pub fn contains_player(&self, name: &str) -> bool {
        self.players().iter().any(|p| p.is_named(name))
    }

    /// Start a fresh match: scores back to zero, clock restarted.
    pub fn begin(&mut self, pairing: Pairing) {
        self.state = CourtState::InPlay { pairing };
        self.score = Score::default();
        self.started_at = Some(Utc::now());
    }

    /// Back to Empty, returning whatever state the court was in.
    pub fn vacate(&mut self) -> CourtState {
        self.score = Score::default();
        self.started_at = None;
        std::mem::take(&mut self.state)
    }
}
