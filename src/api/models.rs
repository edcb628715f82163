//! API Response Models

use crate::games::types::{BetId, BetOption, HistoryEntry, NumberStrategy};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One catalog entry as shown to players
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetOptionView {
    pub id: BetId,
    pub label: String,
    pub stake: f64,
    pub prize: f64,
    pub probability: String,
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_numbers: Option<Vec<u8>>,
}

impl From<&BetOption> for BetOptionView {
    fn from(option: &BetOption) -> Self {
        let (pool_size, winning_numbers) = match &option.numbers {
            NumberStrategy::Pool { pool_size } => (Some(*pool_size), None),
            NumberStrategy::Wheel { winning_numbers } => (None, Some(winning_numbers.clone())),
        };
        Self {
            id: option.id,
            label: option.label.clone(),
            stake: option.stake,
            prize: option.prize,
            probability: option.probability_label(),
            strategy: option.numbers.name().to_string(),
            pool_size,
            winning_numbers,
        }
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub bets: Vec<BetOptionView>,
}

/// Recent results, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}
