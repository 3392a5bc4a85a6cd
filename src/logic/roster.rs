//! Adding and removing players while keeping courts consistent.

use crate::logic::courts::{auto_fill_empty_courts, start_match};
use crate::models::{CourtState, JoinPosition, PlayerTicket, Session, SessionError, SkillTier};

/// Add a player to the waiting line (front or back per the session's join
/// position) and register them. If the session is running, empty courts try
/// to fill right away.
pub fn add_player(
    session: &mut Session,
    name: &str,
    skill: SkillTier,
    external_id: Option<String>,
) -> Result<(), SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::BlankName);
    }
    if session.contains_player(name) {
        return Err(SessionError::DuplicatePlayerName(name.to_string()));
    }
    let capacity = session.player_capacity();
    if session.player_count() >= capacity {
        return Err(SessionError::SessionFull { capacity });
    }

    let mut ticket = PlayerTicket::new(name, skill);
    ticket.external_id = external_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    session.registry.register(&ticket);
    let joined = match session.settings.join_position {
        JoinPosition::Back => session.line.push_back(ticket),
        JoinPosition::Front => session.line.push_front(ticket),
    };
    if let Err(dup) = joined {
        return Err(SessionError::DuplicatePlayerName(dup.name));
    }
    log::info!("{} ({}) joined the line", name, skill);

    auto_fill_empty_courts(session)?;
    Ok(())
}

/// Remove a player from the session. A player on a court vacates it: the rest
/// of that court go back to the front of the line in team order and the court
/// tries to refill immediately, ahead of any other idle court.
pub fn remove_player(session: &mut Session, name: &str) -> Result<PlayerTicket, SessionError> {
    if let Some(ticket) = session.line.remove(name) {
        log::info!("{} left the line", ticket.name);
        auto_fill_empty_courts(session)?;
        return Ok(ticket);
    }

    let court_id = session
        .court_of(name)
        .ok_or_else(|| SessionError::PlayerNotFound(name.trim().to_string()))?;
    let players: Vec<PlayerTicket> = match session.court_mut(court_id)?.vacate() {
        CourtState::InPlay { pairing } => pairing.into_group().into(),
        CourtState::AwaitingOpponent { holders } => holders.into(),
        CourtState::Empty => Vec::new(),
    };
    let (removed, rest): (Vec<PlayerTicket>, Vec<PlayerTicket>) =
        players.into_iter().partition(|p| p.is_named(name));
    log::info!(
        "Court {} vacated: {} left, {} back to the front of the line",
        court_id,
        name.trim(),
        rest.len()
    );
    let rejected = session.line.extend_front(rest);
    debug_assert!(rejected.is_empty(), "court players already waiting: {rejected:?}");
    start_match(session, court_id)?;
    auto_fill_empty_courts(session)?;

    removed
        .into_iter()
        .next()
        .ok_or_else(|| SessionError::PlayerNotFound(name.trim().to_string()))
}
