//! Court lifecycle: start, auto-fill, finish (rotate + self-refill), and the
//! organizer's in-match tools (live score, shuffle, rematch, swap).

use crate::logic::selection::{is_safe_group, pick_four};
use crate::logic::teams::random_split;
use crate::models::{
    CourtId, CourtState, MatchResult, MatchWinner, Pairing, ResultSink, Score, Session,
    SessionError, Team, TeamSide, TEAM_SIZE,
};
use chrono::Utc;

/// How a match was decided when it is finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Finish {
    /// Final score; equal scores are a draw.
    Scores { team_a: u32, team_b: u32 },
    /// Winner declared directly; the court's live score is recorded and must
    /// not have the other team ahead.
    Winner(TeamSide),
}

fn ensure_running(session: &Session) -> Result<(), SessionError> {
    if !session.is_running() {
        return Err(SessionError::InvalidState);
    }
    Ok(())
}

fn in_play_pairing(session: &Session, court_id: CourtId) -> Result<Pairing, SessionError> {
    session
        .court(court_id)?
        .pairing()
        .cloned()
        .ok_or(SessionError::CourtNotInPlay(court_id))
}

/// Start a match on an empty court. `Ok(false)` means no safe group is waiting
/// and the court stays empty.
pub fn start_match(session: &mut Session, court_id: CourtId) -> Result<bool, SessionError> {
    ensure_running(session)?;
    if !session.court(court_id)?.is_empty() {
        return Err(SessionError::CourtOccupied(court_id));
    }
    let group = match pick_four(&mut session.line, session.settings.selection) {
        Some(group) => group,
        None => return Ok(false),
    };
    let pairing = session
        .settings
        .team_split
        .split(group, &mut rand::thread_rng());
    log::info!(
        "Court {}: {} & {} vs {} & {}",
        court_id,
        pairing.team_a[0].name,
        pairing.team_a[1].name,
        pairing.team_b[0].name,
        pairing.team_b[1].name
    );
    session.court_mut(court_id)?.begin(pairing);
    Ok(true)
}

/// Pull two challengers for the team holding a court. `Ok(false)` means no
/// safe pair is waiting yet.
pub fn fill_opponents(session: &mut Session, court_id: CourtId) -> Result<bool, SessionError> {
    ensure_running(session)?;
    let holders: Team = match &session.court(court_id)?.state {
        CourtState::AwaitingOpponent { holders } => holders.clone(),
        CourtState::Empty => return Err(SessionError::CourtNotInPlay(court_id)),
        CourtState::InPlay { .. } => return Err(SessionError::CourtOccupied(court_id)),
    };
    let strategy = session.settings.selection;
    let challengers: Team = match strategy
        .select(&mut session.line, TEAM_SIZE, &holders)
        .and_then(|picked| picked.try_into().ok())
    {
        Some(team) => team,
        None => return Ok(false),
    };
    log::info!(
        "Court {}: {} & {} take on {} & {}",
        court_id,
        challengers[0].name,
        challengers[1].name,
        holders[0].name,
        holders[1].name
    );
    session
        .court_mut(court_id)?
        .begin(Pairing::new(holders, challengers));
    Ok(true)
}

/// Try to fill every court that is not in play, in ascending court id, so
/// lower-numbered courts get first claim on the line. Returns the courts that
/// received a match; a second pass with nothing new returns an empty list.
pub fn auto_fill_empty_courts(session: &mut Session) -> Result<Vec<CourtId>, SessionError> {
    if !session.is_running() {
        return Ok(Vec::new());
    }
    let mut filled = Vec::new();
    let mut ids = session.court_ids();
    ids.sort_unstable();
    for id in ids {
        let court = session.court(id)?;
        let (empty, awaiting) = (court.is_empty(), court.is_awaiting_opponent());
        let started = if empty {
            start_match(session, id)?
        } else if awaiting {
            fill_opponents(session, id)?
        } else {
            false
        };
        if started {
            filled.push(id);
        }
    }
    Ok(filled)
}

/// Finish the match on a court: report it, rotate its players, and refill the
/// court straight away. Other idle courts then get a normal auto-fill pass.
pub fn finish_match(
    session: &mut Session,
    court_id: CourtId,
    finish: Finish,
) -> Result<MatchResult, SessionError> {
    ensure_running(session)?;
    let pairing = in_play_pairing(session, court_id)?;
    let court = session.court(court_id)?;
    let (scores, winner) = match finish {
        Finish::Scores { team_a, team_b } => {
            ((team_a, team_b), MatchWinner::from_scores(team_a, team_b))
        }
        Finish::Winner(side) => {
            let live = MatchWinner::from_scores(court.score.team_a, court.score.team_b);
            if live.side().is_some_and(|leader| leader != side) {
                return Err(SessionError::ScoreDisagreesWithWinner(court_id));
            }
            ((court.score.team_a, court.score.team_b), side.into())
        }
    };
    let result = MatchResult::new(
        court_id,
        &pairing,
        scores,
        winner,
        court.started_at,
        Utc::now(),
    );
    let plan = session.settings.rotation.plan(pairing, winner)?;

    session.registry.record(&result);
    session.history.record(&result);
    log::info!(
        "Court {} finished {}-{} ({})",
        court_id,
        result.score_a,
        result.score_b,
        winner.label()
    );

    let rejected = session.line.extend_back(plan.requeue);
    debug_assert!(rejected.is_empty(), "players left a court twice: {rejected:?}");
    let court = session.court_mut(court_id)?;
    court.vacate();
    match plan.holders {
        Some(holders) => {
            court.state = CourtState::AwaitingOpponent { holders };
            fill_opponents(session, court_id)?;
        }
        None => {
            start_match(session, court_id)?;
        }
    }
    auto_fill_empty_courts(session)?;
    Ok(result)
}

/// Finish a match with its final score.
pub fn submit_score(
    session: &mut Session,
    court_id: CourtId,
    score_a: u32,
    score_b: u32,
) -> Result<MatchResult, SessionError> {
    finish_match(
        session,
        court_id,
        Finish::Scores {
            team_a: score_a,
            team_b: score_b,
        },
    )
}

/// Record the running score of an in-play court.
pub fn update_score(
    session: &mut Session,
    court_id: CourtId,
    score_a: u32,
    score_b: u32,
) -> Result<(), SessionError> {
    ensure_running(session)?;
    in_play_pairing(session, court_id)?;
    session.court_mut(court_id)?.score = Score {
        team_a: score_a,
        team_b: score_b,
    };
    Ok(())
}

/// Re-split the four players on a court at random.
pub fn shuffle_teams(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    ensure_running(session)?;
    let pairing = in_play_pairing(session, court_id)?;
    let reshuffled = random_split(pairing.into_group(), &mut rand::thread_rng());
    if let CourtState::InPlay { pairing } = &mut session.court_mut(court_id)?.state {
        *pairing = reshuffled;
    }
    Ok(())
}

/// Same teams play again: score back to 0-0, clock restarted.
pub fn rematch(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    ensure_running(session)?;
    let pairing = in_play_pairing(session, court_id)?;
    session.court_mut(court_id)?.begin(pairing);
    Ok(())
}

/// Swap a court player with a waiting player. The outgoing player takes the
/// incoming player's place in line. Rejected if the court would become unsafe.
pub fn swap_player(
    session: &mut Session,
    court_id: CourtId,
    out_name: &str,
    in_name: &str,
) -> Result<(), SessionError> {
    ensure_running(session)?;
    let mut pairing = in_play_pairing(session, court_id)?;
    if !pairing.contains(out_name) {
        return Err(SessionError::PlayerNotFound(out_name.to_string()));
    }
    let line_idx = session
        .line
        .position(in_name)
        .ok_or_else(|| SessionError::PlayerNotWaiting(in_name.to_string()))?;
    let incoming = session
        .line
        .get(line_idx)
        .cloned()
        .ok_or_else(|| SessionError::PlayerNotWaiting(in_name.to_string()))?;
    let outgoing = pairing
        .replace(out_name, incoming)
        .ok_or_else(|| SessionError::PlayerNotFound(out_name.to_string()))?;
    if !is_safe_group(pairing.players()) {
        return Err(SessionError::UnsafeGroup);
    }
    log::info!(
        "Court {}: {} swapped out for {}",
        court_id,
        outgoing.name,
        in_name
    );
    session.line.replace_at(line_idx, outgoing);
    if let CourtState::InPlay { pairing: current } = &mut session.court_mut(court_id)?.state {
        *current = pairing;
    }
    auto_fill_empty_courts(session)?;
    Ok(())
}
