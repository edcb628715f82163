use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bet identifier. The stock catalogs use the prize tier (10, 50, 100).
pub type BetId = u32;

/// Number of pockets on a European wheel (0-36)
pub const WHEEL_SIZE: u8 = 37;

/// How the displayed number is chosen once win/loss is decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum NumberStrategy {
    /// Uniform draw in `1..=pool_size`, independent of the decision
    Pool { pool_size: u32 },
    /// Winning numbers vs. their complement over the 37-pocket wheel
    Wheel { winning_numbers: Vec<u8> },
}

impl NumberStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            NumberStrategy::Pool { .. } => "pool",
            NumberStrategy::Wheel { .. } => "wheel",
        }
    }
}

/// A fixed bet configuration a player can choose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetOption {
    pub id: BetId,
    #[serde(default)]
    pub label: String,
    pub stake: f64,
    pub prize: f64,
    pub target_probability: f64,
    #[serde(flatten)]
    pub numbers: NumberStrategy,
}

impl BetOption {
    pub fn new(id: BetId, stake: f64, prize: f64, target_probability: f64, numbers: NumberStrategy) -> Self {
        Self {
            id,
            label: format!("{}€ → {}€", stake, prize),
            stake,
            prize,
            target_probability,
            numbers,
        }
    }

    /// Net amount for the player on a win
    pub fn net_win(&self) -> f64 {
        self.prize - self.stake
    }

    /// Expected house edge implied by the configured probability
    pub fn theoretical_edge(&self) -> f64 {
        1.0 - self.target_probability * self.prize / self.stake
    }

    /// Probability formatted for display, e.g. "9.73%"
    pub fn probability_label(&self) -> String {
        format!("{:.2}%", self.target_probability * 100.0)
    }
}

/// Game outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

impl GameOutcome {
    pub fn from_win(is_win: bool) -> Self {
        if is_win {
            GameOutcome::Win
        } else {
            GameOutcome::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == GameOutcome::Win
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win => write!(f, "win"),
            GameOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// Snapshot returned for every processed bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetResult {
    pub bet_id: BetId,
    pub number: u32,
    /// Pocket index on the physical wheel, when `number` is a wheel pocket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel_slot: Option<usize>,
    pub is_win: bool,
    pub stake: f64,
    /// Configured prize on a win, 0 otherwise
    pub prize: f64,
    pub net_result: f64,
    pub house_edge: f64,
    pub total_staked: f64,
    /// Wall-clock time for display; ordering comes from the history queue
    pub timestamp: DateTime<Utc>,
}

impl BetResult {
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome::from_win(self.is_win)
    }
}

/// One entry of the recent-results window. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub is_win: bool,
    pub net_amount: f64,
    /// Wall-clock time for display; ordering comes from the history queue
    pub timestamp: DateTime<Utc>,
}

/// Read-only statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseStats {
    pub total_staked: f64,
    pub total_paid_out: f64,
    pub total_retained: f64,
    pub current_edge: f64,
    pub target_edge: f64,
    pub recent_win_rate: f64,
    pub bets_placed: u64,
    pub history_length: usize,
}
