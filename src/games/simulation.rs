//! Batch simulation of one bet type
//!
//! Plays a large number of rounds through an engine and compares the
//! observed win rate and edge with what the catalog entry implies.

use crate::errors::{GameError, GameResult};
use crate::games::processor::BetProcessor;
use crate::games::types::BetId;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Aggregated outcome of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub bet_id: BetId,
    pub rounds: u64,
    pub wins: u64,
    pub observed_win_rate: f64,
    pub target_probability: f64,
    pub total_staked: f64,
    pub total_paid_out: f64,
    pub realized_edge: f64,
    pub theoretical_edge: f64,
    pub execution_time: Duration,
}

impl SimulationReport {
    /// Gap between observed and configured win probability
    pub fn probability_error(&self) -> f64 {
        (self.observed_win_rate - self.target_probability).abs()
    }
}

/// Run `rounds` bets of `bet_id`.
///
/// Runs against the engine's live statistics; totals in the report cover
/// only the rounds played here.
pub fn simulate(processor: &mut BetProcessor, bet_id: BetId, rounds: u64) -> GameResult<SimulationReport> {
    if rounds == 0 {
        return Err(GameError::InvalidRounds);
    }
    let option = processor
        .catalog()
        .get(bet_id)
        .cloned()
        .ok_or(GameError::InvalidBet(bet_id))?;

    let start_time = Instant::now();
    let mut wins = 0u64;
    let mut total_staked = 0.0;
    let mut total_paid_out = 0.0;

    for _ in 0..rounds {
        let result = processor.process_bet(bet_id)?;
        total_staked += result.stake;
        if result.is_win {
            wins += 1;
            total_paid_out += result.prize;
        }
    }

    let total_retained = total_staked - (option.stake * wins as f64);
    let report = SimulationReport {
        bet_id,
        rounds,
        wins,
        observed_win_rate: wins as f64 / rounds as f64,
        target_probability: option.target_probability,
        total_staked,
        total_paid_out,
        realized_edge: (total_retained - total_paid_out) / total_staked,
        theoretical_edge: option.theoretical_edge(),
        execution_time: start_time.elapsed(),
    };

    info!(
        bet_id,
        rounds,
        wins,
        observed_win_rate = report.observed_win_rate,
        realized_edge = report.realized_edge,
        "simulation finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::catalog::BetCatalog;
    use crate::games::processor::EngineSettings;
    use crate::games::rng::{ScriptedRandom, SystemRandom};

    #[test]
    fn test_rejects_zero_rounds() {
        let mut processor = BetProcessor::with_defaults().unwrap();
        assert_eq!(simulate(&mut processor, 10, 0).unwrap_err(), GameError::InvalidRounds);
    }

    #[test]
    fn test_rejects_unknown_bet() {
        let mut processor = BetProcessor::with_defaults().unwrap();
        assert_eq!(simulate(&mut processor, 3, 10).unwrap_err(), GameError::InvalidBet(3));
    }

    #[test]
    fn test_all_losses() {
        let mut processor = BetProcessor::new(
            BetCatalog::european(),
            Box::new(ScriptedRandom::constant(0.9)),
            EngineSettings::default(),
        );
        let report = simulate(&mut processor, 10, 50).unwrap();
        assert_eq!(report.wins, 0);
        assert_eq!(report.total_staked, 50.0);
        assert_eq!(report.realized_edge, 1.0);
    }

    #[test]
    fn test_converges_to_target() {
        let mut processor = BetProcessor::new(
            BetCatalog::european(),
            Box::new(SystemRandom::seeded(99)),
            EngineSettings::default(),
        );
        let report = simulate(&mut processor, 10, 200_000).unwrap();
        assert!(report.probability_error() < 0.01, "report: {:?}", report);
        assert!((report.theoretical_edge - 0.027).abs() < 1e-9);
    }
}
