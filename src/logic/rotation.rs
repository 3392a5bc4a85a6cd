//! Rotation policy: where the four players of a finished match go next.

use crate::models::{MatchWinner, Pairing, PlayerTicket, RotationPolicy, SessionError, Team};

/// What happens to a finished court's players.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RotationPlan {
    /// Appended to the back of the waiting line, in this order.
    pub requeue: Vec<PlayerTicket>,
    /// Team that keeps the court (winners-stay only).
    pub holders: Option<Team>,
}

impl RotationPolicy {
    /// Plan the rotation for a finished match. A draw has no winners to keep
    /// on court, so winners-stay rejects it.
    pub fn plan(self, pairing: Pairing, winner: MatchWinner) -> Result<RotationPlan, SessionError> {
        let plan = match (self, winner.side()) {
            (RotationPolicy::FifoPreserving, _) | (RotationPolicy::WinnersFirst, None) => RotationPlan {
                requeue: pairing.into_group().into(),
                holders: None,
            },
            (RotationPolicy::WinnersFirst, Some(side)) => {
                let (winners, losers) = pairing.split_by_winner(side);
                RotationPlan {
                    requeue: winners.into_iter().chain(losers).collect(),
                    holders: None,
                }
            }
            (RotationPolicy::WinnersStay, Some(side)) => {
                let (winners, losers) = pairing.split_by_winner(side);
                RotationPlan {
                    requeue: losers.into(),
                    holders: Some(winners),
                }
            }
            (RotationPolicy::WinnersStay, None) => return Err(SessionError::DrawNotAllowed),
        };
        Ok(plan)
    }
}
