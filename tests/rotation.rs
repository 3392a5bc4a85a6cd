//! Integration tests for where players go after a match.

mod fixtures;

use court_rotation_web::{
    submit_score, CourtState, MatchWinner, Pairing, PlayerTicket, RotationPolicy, Session,
    SessionError, SessionSettings, SkillTier, Team,
};
use fixtures::*;
use SkillTier::*;

fn team(a: &str, b: &str) -> Team {
    [PlayerTicket::new(a, Novice), PlayerTicket::new(b, Novice)]
}

fn pairing() -> Pairing {
    Pairing::new(team("A1", "A2"), team("B1", "B2"))
}

fn requeue_names(policy: RotationPolicy, winner: MatchWinner) -> Vec<String> {
    policy
        .plan(pairing(), winner)
        .unwrap()
        .requeue
        .into_iter()
        .map(|p| p.name)
        .collect()
}

fn policy(rotation: RotationPolicy) -> SessionSettings {
    SessionSettings {
        court_count: 1,
        rotation,
        ..SessionSettings::default()
    }
}

/// One court with four novices playing and two beginners waiting.
fn busy_court(rotation: RotationPolicy) -> Session {
    let mut players = numbered("N", 4, Novice);
    players.extend(numbered("W", 2, Beginner));
    running_session(policy(rotation), &as_refs(&players))
}

fn team_names(team: &Team) -> Vec<String> {
    team.iter().map(|p| p.name.clone()).collect()
}

#[test]
fn fifo_requeues_in_team_order_whoever_wins() {
    for winner in [MatchWinner::TeamA, MatchWinner::TeamB, MatchWinner::Draw] {
        assert_eq!(
            requeue_names(RotationPolicy::FifoPreserving, winner),
            vec!["A1", "A2", "B1", "B2"]
        );
    }
}

#[test]
fn winners_first_puts_the_winning_team_ahead() {
    assert_eq!(
        requeue_names(RotationPolicy::WinnersFirst, MatchWinner::TeamB),
        vec!["B1", "B2", "A1", "A2"]
    );
    assert_eq!(
        requeue_names(RotationPolicy::WinnersFirst, MatchWinner::TeamA),
        vec!["A1", "A2", "B1", "B2"]
    );
}

#[test]
fn winners_first_draw_falls_back_to_team_order() {
    assert_eq!(
        requeue_names(RotationPolicy::WinnersFirst, MatchWinner::Draw),
        vec!["A1", "A2", "B1", "B2"]
    );
}

#[test]
fn winners_stay_keeps_the_winners_as_holders() {
    let plan = RotationPolicy::WinnersStay
        .plan(pairing(), MatchWinner::TeamB)
        .unwrap();
    let holders = plan.holders.as_ref().map(team_names).unwrap();
    assert_eq!(holders, vec!["B1", "B2"]);
    let requeued: Vec<&str> = plan.requeue.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(requeued, vec!["A1", "A2"]);
}

#[test]
fn winners_stay_rejects_a_draw() {
    assert_eq!(
        RotationPolicy::WinnersStay.plan(pairing(), MatchWinner::Draw),
        Err(SessionError::DrawNotAllowed)
    );
}

#[test]
fn fifo_session_leaves_team_b_waiting_after_a_team_b_win() {
    let mut s = busy_court(RotationPolicy::FifoPreserving);
    let before = court(&s, 1).pairing().cloned().unwrap();
    submit_score(&mut s, 1, 4, 11).unwrap();
    assert_eq!(line_names(&s), team_names(&before.team_b));
}

#[test]
fn winners_first_session_leaves_losers_waiting() {
    let mut s = busy_court(RotationPolicy::WinnersFirst);
    let before = court(&s, 1).pairing().cloned().unwrap();
    submit_score(&mut s, 1, 4, 11).unwrap();
    assert_eq!(line_names(&s), team_names(&before.team_a));
}

#[test]
fn winners_stay_session_brings_in_challengers() {
    let mut s = busy_court(RotationPolicy::WinnersStay);
    let before = court(&s, 1).pairing().cloned().unwrap();
    submit_score(&mut s, 1, 11, 8).unwrap();

    let after = court(&s, 1).pairing().cloned().unwrap();
    assert_eq!(after.team_a, before.team_a);
    assert_eq!(team_names(&after.team_b), vec!["W1", "W2"]);
    assert_eq!(line_names(&s), team_names(&before.team_b));
}

#[test]
fn rejected_draw_changes_nothing() {
    let mut s = busy_court(RotationPolicy::WinnersStay);
    let before = court(&s, 1).clone();
    assert_eq!(
        submit_score(&mut s, 1, 9, 9).unwrap_err(),
        SessionError::DrawNotAllowed
    );
    assert_eq!(court(&s, 1), &before);
    assert_eq!(line_names(&s), vec!["W1", "W2"]);
    assert!(s.history.is_empty());
    assert!(s.registry.records().all(|r| r.games == 0));
}

#[test]
fn accepted_draw_counts_games_only() {
    let mut s = busy_court(RotationPolicy::WinnersFirst);
    let result = submit_score(&mut s, 1, 9, 9).unwrap();
    assert_eq!(result.winner, MatchWinner::Draw);
    assert!(result.winners().is_empty());
    for name in result.players() {
        let record = s.registry.get(name).unwrap();
        assert_eq!((record.games, record.wins, record.losses), (1, 0, 0));
    }
}

#[test]
fn losers_rematch_holders_when_no_other_safe_pair() {
    let mut players = numbered("I", 4, Intermediate);
    players.extend(numbered("B", 2, Beginner));
    let mut s = running_session(policy(RotationPolicy::WinnersStay), &as_refs(&players));
    let before = court(&s, 1).pairing().cloned().unwrap();
    submit_score(&mut s, 1, 11, 3).unwrap();

    // Losers are intermediates and are the only safe pair for the holders.
    let after = court(&s, 1).pairing().cloned().unwrap();
    assert_eq!(after.team_a, before.team_a);
    assert_eq!(after.team_b, before.team_b);
    assert_eq!(line_names(&s), vec!["B1", "B2"]);
    assert!(!matches!(court(&s, 1).state, CourtState::AwaitingOpponent { .. }));
}
