//! Safety-combo selector: finds the first safe group in the waiting line.

use crate::models::{PlayerTicket, SelectionStrategy, WaitingLine, GROUP_SIZE};
use itertools::Itertools;

/// Widest gap in skill rank allowed inside one group. With three tiers this
/// keeps beginners and intermediates apart.
pub const MAX_TIER_SPREAD: u8 = 1;

/// True if the players can share a court.
pub fn is_safe_group<'a>(players: impl IntoIterator<Item = &'a PlayerTicket>) -> bool {
    let (lowest, highest) = players
        .into_iter()
        .map(|p| p.skill.rank())
        .fold((u8::MAX, u8::MIN), |(lo, hi), r| (lo.min(r), hi.max(r)));
    lowest > highest || highest - lowest <= MAX_TIER_SPREAD
}

impl SelectionStrategy {
    /// Pick `needed` tickets that are safe together with `anchored` (players
    /// already committed to the court), remove them from the line and return
    /// them in line order. `None` means keep waiting; the line is untouched.
    pub fn select(
        self,
        line: &mut WaitingLine,
        needed: usize,
        anchored: &[PlayerTicket],
    ) -> Option<Vec<PlayerTicket>> {
        if needed == 0 || line.len() < needed {
            return None;
        }
        let indices = match self {
            SelectionStrategy::SlidingWindow => sliding_window(line, needed, anchored),
            SelectionStrategy::Exhaustive => first_safe_subset(line, needed, anchored),
        };
        match indices {
            Some(indices) => Some(line.take_at(&indices)),
            None => {
                log::debug!(
                    "No safe group of {} among {} waiting ({:?})",
                    needed,
                    line.len(),
                    self
                );
                None
            }
        }
    }
}

/// Take a full match's worth of players from the line.
pub fn pick_four(
    line: &mut WaitingLine,
    strategy: SelectionStrategy,
) -> Option<[PlayerTicket; GROUP_SIZE]> {
    strategy
        .select(line, GROUP_SIZE, &[])
        .and_then(|group| group.try_into().ok())
}

fn sliding_window(line: &WaitingLine, needed: usize, anchored: &[PlayerTicket]) -> Option<Vec<usize>> {
    (0..=line.len() - needed)
        .find(|&shift| is_safe_group(anchored.iter().chain(line.window(shift..shift + needed))))
        .map(|shift| (shift..shift + needed).collect())
}

fn first_safe_subset(
    line: &WaitingLine,
    needed: usize,
    anchored: &[PlayerTicket],
) -> Option<Vec<usize>> {
    (0..line.len()).combinations(needed).find(|combo| {
        is_safe_group(anchored.iter().chain(combo.iter().filter_map(|&i| line.get(i))))
    })
}
