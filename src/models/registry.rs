//! Player registry (win/loss counters) and match history: the two places a
//! finished match is reported to.

use crate::models::match_result::MatchResult;
use crate::models::ticket::{PlayerTicket, SkillTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anything that wants to hear about finished matches.
pub trait ResultSink {
    fn record(&mut self, result: &MatchResult);
}

/// Stats for one registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub skill: SkillTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    fn from_ticket(ticket: &PlayerTicket) -> Self {
        Self {
            name: ticket.name.clone(),
            skill: ticket.skill,
            external_id: ticket.external_id.clone(),
            games: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Win percentage rounded to one decimal; 0 before the first game.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.wins as f64 / self.games as f64 * 1000.0).round() / 10.0
    }
}

/// Registered players keyed by lowercase name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerRegistry {
    records: BTreeMap<String, PlayerRecord>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }

    /// Register a player. A returning player keeps their counters; skill and
    /// external id follow the latest registration.
    pub fn register(&mut self, ticket: &PlayerTicket) {
        let record = self
            .records
            .entry(Self::key(&ticket.name))
            .or_insert_with(|| PlayerRecord::from_ticket(ticket));
        record.skill = ticket.skill;
        if ticket.external_id.is_some() {
            record.external_id = ticket.external_id.clone();
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.get(&Self::key(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.values()
    }

    /// Most wins first, then best win rate, then name.
    pub fn leaderboard(&self) -> Vec<&PlayerRecord> {
        self.leaderboard_for(None)
    }

    /// Leaderboard restricted to one skill tier, or everyone for `None`.
    pub fn leaderboard_for(&self, tier: Option<SkillTier>) -> Vec<&PlayerRecord> {
        let mut board: Vec<&PlayerRecord> = self
            .records
            .values()
            .filter(|r| tier.map_or(true, |t| r.skill == t))
            .collect();
        board.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.win_rate().total_cmp(&a.win_rate()))
                .then_with(|| a.name.cmp(&b.name))
        });
        board
    }

    /// One leaderboard per tier that has registered players, lowest tier first.
    pub fn leaderboard_by_tier(&self) -> BTreeMap<SkillTier, Vec<&PlayerRecord>> {
        SkillTier::ALL
            .iter()
            .map(|&tier| (tier, self.leaderboard_for(Some(tier))))
            .filter(|(_, board)| !board.is_empty())
            .collect()
    }

    fn record_mut(&mut self, name: &str) -> Option<&mut PlayerRecord> {
        let record = self.records.get_mut(&Self::key(name));
        if record.is_none() {
            log::warn!("No registry entry for {}; result not counted", name);
        }
        record
    }
}

impl ResultSink for PlayerRegistry {
    fn record(&mut self, result: &MatchResult) {
        for name in result.players() {
            if let Some(r) = self.record_mut(name) {
                r.games += 1;
            }
        }
        for name in result.winners() {
            if let Some(r) = self.record_mut(name) {
                r.wins += 1;
            }
        }
        for name in result.losers() {
            if let Some(r) = self.record_mut(name) {
                r.losses += 1;
            }
        }
    }
}

/// Append-only list of finished matches for the current session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchHistory {
    results: Vec<MatchResult>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}

impl ResultSink for MatchHistory {
    fn record(&mut self, result: &MatchResult) {
        self.results.push(result.clone());
    }
}
