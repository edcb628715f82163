use crate::games::types::BetOption;
use serde::{Deserialize, Serialize};

/// Default house edge the catalog probabilities were tuned for (2.7%)
pub const DEFAULT_TARGET_EDGE: f64 = 0.027;

/// Running stake/payout accumulators and the realized house edge.
///
/// `target_edge` is reported only. Probabilities are static per bet and the
/// realized edge is never fed back into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseEdgeTracker {
    total_staked: f64,
    total_paid_out: f64,
    total_retained: f64,
    current_edge: f64,
    target_edge: f64,
    bets_placed: u64,
}

impl HouseEdgeTracker {
    pub fn new(target_edge: f64) -> Self {
        Self {
            total_staked: 0.0,
            total_paid_out: 0.0,
            total_retained: 0.0,
            current_edge: 0.0,
            target_edge,
            bets_placed: 0,
        }
    }

    /// Record one settled bet and return the player's net amount
    pub fn record_outcome(&mut self, option: &BetOption, is_win: bool) -> f64 {
        self.total_staked += option.stake;
        self.bets_placed += 1;

        let net = if is_win {
            self.total_paid_out += option.prize;
            option.prize - option.stake
        } else {
            self.total_retained += option.stake;
            -option.stake
        };

        self.current_edge = if self.total_staked > 0.0 {
            (self.total_retained - self.total_paid_out) / self.total_staked
        } else {
            0.0
        };

        net
    }

    /// Back to zero; the target edge is kept
    pub fn reset(&mut self) {
        *self = Self::new(self.target_edge);
    }

    pub fn total_staked(&self) -> f64 {
        self.total_staked
    }

    pub fn total_paid_out(&self) -> f64 {
        self.total_paid_out
    }

    pub fn total_retained(&self) -> f64 {
        self.total_retained
    }

    pub fn current_edge(&self) -> f64 {
        self.current_edge
    }

    pub fn target_edge(&self) -> f64 {
        self.target_edge
    }

    pub fn bets_placed(&self) -> u64 {
        self.bets_placed
    }
}

impl Default for HouseEdgeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_EDGE)
    }
}
