//! Shared helpers for building sessions in integration tests.
#![allow(dead_code)]

use court_rotation_web::{
    add_player, start_session, Court, CourtId, Session, SessionSettings, SkillTier,
};

/// Session in Setup with the given players added in order.
pub fn session_with(settings: SessionSettings, players: &[(&str, SkillTier)]) -> Session {
    let mut s = Session::new(settings);
    for (name, skill) in players {
        add_player(&mut s, name, *skill, None).unwrap();
    }
    s
}

/// Same as `session_with`, then started.
pub fn running_session(settings: SessionSettings, players: &[(&str, SkillTier)]) -> Session {
    let mut s = session_with(settings, players);
    start_session(&mut s).unwrap();
    s
}

pub fn courts(count: u32) -> SessionSettings {
    SessionSettings {
        court_count: count,
        ..SessionSettings::default()
    }
}

/// `prefix1..=prefixN`, all of one tier.
pub fn numbered(prefix: &str, n: usize, skill: SkillTier) -> Vec<(String, SkillTier)> {
    (1..=n).map(|i| (format!("{prefix}{i}"), skill)).collect()
}

pub fn as_refs(players: &[(String, SkillTier)]) -> Vec<(&str, SkillTier)> {
    players.iter().map(|(n, s)| (n.as_str(), *s)).collect()
}

pub fn court(s: &Session, id: CourtId) -> &Court {
    s.court(id).unwrap()
}

/// Names on a court, sorted.
pub fn court_names(s: &Session, id: CourtId) -> Vec<String> {
    let mut names: Vec<String> = court(s, id)
        .players()
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    names.sort();
    names
}

pub fn line_names(s: &Session) -> Vec<String> {
    s.line.names().into_iter().map(String::from).collect()
}

pub fn sorted(names: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    v.sort();
    v
}
