//! Team builder: splits a selected group of four into two teams of two.

use crate::models::{Pairing, PlayerTicket, TeamSplit, GROUP_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;

impl TeamSplit {
    /// Split `group` into two teams. Does not touch the waiting line.
    pub fn split<R: Rng + ?Sized>(self, group: [PlayerTicket; GROUP_SIZE], rng: &mut R) -> Pairing {
        match self {
            TeamSplit::Random => random_split(group, rng),
            TeamSplit::SkillBalanced => balanced_split(group, rng),
        }
    }
}

/// Shuffle, first two against last two. Each of the three distinct pairings
/// is equally likely.
pub fn random_split<R: Rng + ?Sized>(mut group: [PlayerTicket; GROUP_SIZE], rng: &mut R) -> Pairing {
    group.shuffle(rng);
    let [a1, a2, b1, b2] = group;
    Pairing::new([a1, a2], [b1, b2])
}

/// Snake draft by tier: strongest with weakest, the middle two together.
/// Ties are broken randomly and so is which pair becomes team A.
fn balanced_split<R: Rng + ?Sized>(mut group: [PlayerTicket; GROUP_SIZE], rng: &mut R) -> Pairing {
    group.shuffle(rng);
    group.sort_by(|x, y| y.skill.cmp(&x.skill));
    let [first, second, third, fourth] = group;
    let outer = [first, fourth];
    let inner = [second, third];
    if rng.gen_bool(0.5) {
        Pairing::new(outer, inner)
    } else {
        Pairing::new(inner, outer)
    }
}
