//! Session start and reset.

use crate::logic::courts::auto_fill_empty_courts;
use crate::models::{validate_court_count, Court, CourtId, Session, SessionError, SessionState};

/// Start the session: create the configured number of empty courts and run
/// one auto-fill pass. Returns the courts that got a match.
pub fn start_session(session: &mut Session) -> Result<Vec<CourtId>, SessionError> {
    if session.state != SessionState::Setup {
        return Err(SessionError::InvalidState);
    }
    let court_count = session.settings.court_count;
    validate_court_count(court_count)?;
    session.courts = (1..=court_count).map(Court::new).collect();
    session.state = SessionState::Running;
    log::info!(
        "Session {} started with {} court(s), {} waiting",
        session.id,
        court_count,
        session.line.len()
    );
    auto_fill_empty_courts(session)
}

/// Discard the waiting line, the courts and the match history; back to Setup.
/// The player registry keeps its counters.
pub fn reset_session(session: &mut Session) {
    session.line.clear();
    session.courts.clear();
    session.history.clear();
    session.state = SessionState::Setup;
    log::info!("Session {} reset", session.id);
}
