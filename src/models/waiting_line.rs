//! The ordered line of players waiting for a court.

use crate::models::ticket::PlayerTicket;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

/// Waiting players, index 0 = longest waiting. Names are unique within the line.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitingLine {
    tickets: VecDeque<PlayerTicket>,
}

impl WaitingLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerTicket> {
        self.tickets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PlayerTicket> {
        self.tickets.get(index)
    }

    /// Tickets in `range`, front to back. Panics if the range is out of bounds.
    pub fn window(&self, range: Range<usize>) -> impl Iterator<Item = &PlayerTicket> {
        self.tickets.range(range)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tickets.iter().position(|t| t.is_named(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Names front to back (for display and assertions).
    pub fn names(&self) -> Vec<&str> {
        self.tickets.iter().map(|t| t.name.as_str()).collect()
    }

    /// Append a ticket. Returns it back if the name is already waiting.
    pub fn push_back(&mut self, ticket: PlayerTicket) -> Result<(), PlayerTicket> {
        if self.contains(&ticket.name) {
            return Err(ticket);
        }
        self.tickets.push_back(ticket);
        Ok(())
    }

    /// Prepend a ticket. Returns it back if the name is already waiting.
    pub fn push_front(&mut self, ticket: PlayerTicket) -> Result<(), PlayerTicket> {
        if self.contains(&ticket.name) {
            return Err(ticket);
        }
        self.tickets.push_front(ticket);
        Ok(())
    }

    /// Append finished players in the given order. Tickets whose name is
    /// already waiting are handed back.
    #[must_use = "rejected tickets are players the line did not take"]
    pub fn extend_back(&mut self, tickets: impl IntoIterator<Item = PlayerTicket>) -> Vec<PlayerTicket> {
        let mut rejected = Vec::new();
        for ticket in tickets {
            if let Err(dup) = self.push_back(ticket) {
                log::warn!("{} is already waiting; not queued twice", dup.name);
                rejected.push(dup);
            }
        }
        rejected
    }

    /// Put players at the front, keeping their relative order. Tickets whose
    /// name is already waiting are handed back.
    #[must_use = "rejected tickets are players the line did not take"]
    pub fn extend_front(&mut self, tickets: Vec<PlayerTicket>) -> Vec<PlayerTicket> {
        let mut rejected = Vec::new();
        for ticket in tickets.into_iter().rev() {
            if let Err(dup) = self.push_front(ticket) {
                log::warn!("{} is already waiting; not queued twice", dup.name);
                rejected.push(dup);
            }
        }
        rejected.reverse();
        rejected
    }

    pub fn remove(&mut self, name: &str) -> Option<PlayerTicket> {
        let idx = self.position(name)?;
        self.tickets.remove(idx)
    }

    /// Remove the tickets at `indices` (ascending) and return them in line order.
    /// The remaining tickets keep their relative order.
    pub fn take_at(&mut self, indices: &[usize]) -> Vec<PlayerTicket> {
        let mut taken: Vec<PlayerTicket> = indices
            .iter()
            .rev()
            .filter_map(|&i| self.tickets.remove(i))
            .collect();
        taken.reverse();
        taken
    }

    /// Put `ticket` in the slot at `index`, returning whoever was there.
    pub fn replace_at(&mut self, index: usize, ticket: PlayerTicket) -> Option<PlayerTicket> {
        self.tickets
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, ticket))
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
    }
}
