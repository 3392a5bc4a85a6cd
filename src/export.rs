//! CSV export of match history and player stats.

use crate::models::{MatchHistory, PlayerRegistry};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV flush failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct MatchRow<'a> {
    #[serde(rename = "Court")]
    court: u32,
    #[serde(rename = "Team A")]
    team_a: String,
    #[serde(rename = "Team B")]
    team_b: String,
    #[serde(rename = "Score A")]
    score_a: u32,
    #[serde(rename = "Score B")]
    score_b: u32,
    #[serde(rename = "Winner")]
    winner: &'a str,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Duration (Minutes)")]
    duration_minutes: f64,
}

#[derive(Serialize)]
struct PlayerRow<'a> {
    #[serde(rename = "Player Name")]
    name: &'a str,
    #[serde(rename = "External ID")]
    external_id: &'a str,
    #[serde(rename = "Skill")]
    skill: &'a str,
    #[serde(rename = "Games Played")]
    games: u32,
    #[serde(rename = "Wins")]
    wins: u32,
    #[serde(rename = "Losses")]
    losses: u32,
    #[serde(rename = "Win %")]
    win_rate: f64,
}

const TIME_FORMAT: &str = "%H:%M:%S";

/// One row per finished match. No matches, no bytes.
pub fn matches_csv(history: &MatchHistory) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for m in history.results() {
        wtr.serialize(MatchRow {
            court: m.court,
            team_a: m.team_a.join(" & "),
            team_b: m.team_b.join(" & "),
            score_a: m.score_a,
            score_b: m.score_b,
            winner: m.winner.label(),
            start_time: m
                .started_at
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            end_time: m.ended_at.format(TIME_FORMAT).to_string(),
            duration_minutes: m.duration_minutes(),
        })?;
    }
    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// One row per registered player, in name order.
pub fn players_csv(registry: &PlayerRegistry) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for p in registry.records() {
        wtr.serialize(PlayerRow {
            name: &p.name,
            external_id: p.external_id.as_deref().unwrap_or(""),
            skill: p.skill.label(),
            games: p.games,
            wins: p.wins,
            losses: p.losses,
            win_rate: p.win_rate(),
        })?;
    }
    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
