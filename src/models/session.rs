//! Session: the waiting line, the courts, and everything reported by finished matches.

use crate::models::court::{Court, CourtId, CourtState};
use crate::models::registry::{MatchHistory, PlayerRegistry};
use crate::models::settings::{SessionSettings, MAX_COURTS, MIN_COURTS};
use crate::models::ticket::PlayerTicket;
use crate::models::waiting_line::WaitingLine;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during session operations. A failed operation
/// leaves the session untouched.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Player name must not be blank")]
    BlankName,
    #[error("A player named {0} is already in the session")]
    DuplicatePlayerName(String),
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error("{0} is not waiting in line")]
    PlayerNotWaiting(String),
    #[error("Court {0} does not exist")]
    CourtNotFound(CourtId),
    #[error("Court {0} already has players assigned")]
    CourtOccupied(CourtId),
    #[error("Court {0} has no match in progress")]
    CourtNotInPlay(CourtId),
    #[error("Number of courts must be between {min} and {max} (got {requested})")]
    InvalidCourtCount { requested: u32, min: u32, max: u32 },
    #[error("Session is full ({capacity} players for the configured courts)")]
    SessionFull { capacity: usize },
    #[error("Court {0}: the declared winner is behind on the live score")]
    ScoreDisagreesWithWinner(CourtId),
    #[error("A draw cannot be submitted while winners stay on court")]
    DrawNotAllowed,
    #[error("Beginner and intermediate players cannot share a court")]
    UnsafeGroup,
    #[error("Invalid state for this action")]
    InvalidState,
}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Players can join, settings can change; no courts yet.
    #[default]
    Setup,
    /// Courts exist and rotate.
    Running,
}

/// One open-play session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub settings: SessionSettings,
    pub state: SessionState,
    pub line: WaitingLine,
    /// Ordered by ascending court id.
    pub courts: Vec<Court>,
    pub registry: PlayerRegistry,
    pub history: MatchHistory,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl Session {
    /// Create a new session in Setup with nobody waiting.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            settings,
            state: SessionState::Setup,
            line: WaitingLine::new(),
            courts: Vec::new(),
            registry: PlayerRegistry::new(),
            history: MatchHistory::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Fix the number of courts (Setup only).
    pub fn configure_session(&mut self, court_count: u32) -> Result<(), SessionError> {
        self.configure(SessionSettings {
            court_count,
            ..self.settings.clone()
        })
    }

    /// Replace all session settings (Setup only). Fewer courts cannot leave
    /// more players than the new capacity allows.
    pub fn configure(&mut self, settings: SessionSettings) -> Result<(), SessionError> {
        if self.state != SessionState::Setup {
            return Err(SessionError::InvalidState);
        }
        validate_court_count(settings.court_count)?;
        validate_capacity(&settings, self.player_count())?;
        self.settings = settings;
        Ok(())
    }

    pub fn court(&self, id: CourtId) -> Result<&Court, SessionError> {
        self.courts
            .iter()
            .find(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))
    }

    pub fn court_mut(&mut self, id: CourtId) -> Result<&mut Court, SessionError> {
        self.courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))
    }

    pub fn court_ids(&self) -> Vec<CourtId> {
        self.courts.iter().map(|c| c.id).collect()
    }

    /// Court the named player is assigned to, if any.
    pub fn court_of(&self, name: &str) -> Option<CourtId> {
        self.courts
            .iter()
            .find(|c| c.contains_player(name))
            .map(|c| c.id)
    }

    pub fn contains_player(&self, name: &str) -> bool {
        self.line.contains(name) || self.court_of(name).is_some()
    }

    /// Players currently assigned to courts.
    pub fn players_on_courts(&self) -> usize {
        self.courts.iter().map(|c| c.players().len()).sum()
    }

    /// Everyone in the session: waiting plus on courts.
    pub fn player_count(&self) -> usize {
        self.line.len() + self.players_on_courts()
    }

    pub fn player_capacity(&self) -> usize {
        self.settings.player_capacity()
    }

    /// Courts with a full match in progress.
    pub fn courts_in_play(&self) -> impl Iterator<Item = &Court> {
        self.courts
            .iter()
            .filter(|c| matches!(c.state, CourtState::InPlay { .. }))
    }

    /// Every ticket in the session: line first, then courts in id order.
    pub fn all_players(&self) -> Vec<&PlayerTicket> {
        self.line
            .iter()
            .chain(self.courts.iter().flat_map(|c| c.players()))
            .collect()
    }

    /// Check what must hold between operations: settings in range, courts
    /// numbered `1..=court_count` while running (none in Setup), players
    /// within capacity, no name twice across the line and the courts, and no
    /// court mixing tiers unsafely.
    pub fn check_invariants(&self) -> Result<(), SessionError> {
        validate_court_count(self.settings.court_count)?;
        let expected: Vec<CourtId> = match self.state {
            SessionState::Setup => Vec::new(),
            SessionState::Running => (1..=self.settings.court_count).collect(),
        };
        if self.court_ids() != expected {
            return Err(SessionError::InvalidState);
        }
        validate_capacity(&self.settings, self.player_count())?;
        let mut seen = HashSet::new();
        for p in self.all_players() {
            if !seen.insert(p.name.trim().to_ascii_lowercase()) {
                return Err(SessionError::DuplicatePlayerName(p.name.clone()));
            }
        }
        for court in &self.courts {
            if !crate::logic::is_safe_group(court.players()) {
                return Err(SessionError::UnsafeGroup);
            }
        }
        Ok(())
    }
}

fn validate_capacity(settings: &SessionSettings, players: usize) -> Result<(), SessionError> {
    let capacity = settings.player_capacity();
    if players > capacity {
        return Err(SessionError::SessionFull { capacity });
    }
    Ok(())
}

pub(crate) fn validate_court_count(court_count: u32) -> Result<(), SessionError> {
    if !(MIN_COURTS..=MAX_COURTS).contains(&court_count) {
        return Err(SessionError::InvalidCourtCount {
            requested: court_count,
            min: MIN_COURTS,
            max: MAX_COURTS,
        });
    }
    Ok(())
}
