//! Integration tests for picking safe groups from the waiting line.

use court_rotation_web::{
    is_safe_group, pick_four, PlayerTicket, SelectionStrategy, SkillTier, WaitingLine,
};
use SkillTier::*;

fn line_of(players: &[(&str, SkillTier)]) -> WaitingLine {
    let mut line = WaitingLine::new();
    for (name, skill) in players {
        line.push_back(PlayerTicket::new(*name, *skill)).unwrap();
    }
    line
}

fn names(group: &[PlayerTicket]) -> Vec<&str> {
    group.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn beginner_and_intermediate_never_share_a_group() {
    let mixed = [
        PlayerTicket::new("A", Beginner),
        PlayerTicket::new("B", Novice),
        PlayerTicket::new("C", Novice),
        PlayerTicket::new("D", Intermediate),
    ];
    assert!(!is_safe_group(&mixed));
    assert!(is_safe_group(&mixed[..3]));
    assert!(is_safe_group(&mixed[1..]));
}

#[test]
fn first_four_are_taken_when_safe() {
    let mut line = line_of(&[
        ("A", Novice),
        ("B", Novice),
        ("C", Beginner),
        ("D", Beginner),
        ("E", Novice),
    ]);
    let group = pick_four(&mut line, SelectionStrategy::SlidingWindow).unwrap();
    assert_eq!(names(&group), vec!["A", "B", "C", "D"]);
    assert_eq!(line.names(), vec!["E"]);
}

#[test]
fn sliding_window_skips_unsafe_prefix() {
    let mut line = line_of(&[
        ("A", Beginner),
        ("B", Intermediate),
        ("C", Intermediate),
        ("D", Novice),
        ("E", Intermediate),
    ]);
    let group = pick_four(&mut line, SelectionStrategy::SlidingWindow).unwrap();
    assert_eq!(names(&group), vec!["B", "C", "D", "E"]);
    assert_eq!(line.names(), vec!["A"]);
}

#[test]
fn sliding_window_finds_nothing_and_leaves_line_alone() {
    let players = [
        ("A", Beginner),
        ("B", Intermediate),
        ("C", Beginner),
        ("D", Beginner),
        ("E", Novice),
    ];
    let mut line = line_of(&players);
    assert!(pick_four(&mut line, SelectionStrategy::SlidingWindow).is_none());
    assert_eq!(line.names(), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn exhaustive_finds_a_non_contiguous_group() {
    let mut line = line_of(&[
        ("A", Beginner),
        ("B", Intermediate),
        ("C", Beginner),
        ("D", Beginner),
        ("E", Novice),
    ]);
    let group = pick_four(&mut line, SelectionStrategy::Exhaustive).unwrap();
    assert_eq!(names(&group), vec!["A", "C", "D", "E"]);
    assert_eq!(line.names(), vec!["B"]);
}

#[test]
fn fewer_than_four_waiting_yields_nothing() {
    let mut line = line_of(&[("A", Novice), ("B", Novice), ("C", Novice)]);
    for strategy in [SelectionStrategy::SlidingWindow, SelectionStrategy::Exhaustive] {
        assert!(pick_four(&mut line, strategy).is_none());
        assert_eq!(line.len(), 3);
    }
}

#[test]
fn challengers_must_be_safe_with_the_holders() {
    let holders = [
        PlayerTicket::new("H1", Beginner),
        PlayerTicket::new("H2", Beginner),
    ];
    let mut line = line_of(&[("I1", Intermediate), ("N1", Novice), ("B1", Beginner)]);
    let picked = SelectionStrategy::SlidingWindow
        .select(&mut line, 2, &holders)
        .unwrap();
    assert_eq!(names(&picked), vec!["N1", "B1"]);
    assert_eq!(line.names(), vec!["I1"]);
}
