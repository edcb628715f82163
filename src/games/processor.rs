use crate::errors::{ConfigurationError, GameError, GameResult};
use crate::games::catalog::{wheel_slot, BetCatalog};
use crate::games::decider::OutcomeDecider;
use crate::games::history::{HistoryWindow, DEFAULT_MAX_HISTORY_LENGTH};
use crate::games::rng::{RandomSource, SystemRandom};
use crate::games::selector::NumberSelector;
use crate::games::tracker::{HouseEdgeTracker, DEFAULT_TARGET_EDGE};
use crate::games::types::{BetId, BetResult, HistoryEntry, HouseStats, NumberStrategy};
use chrono::Utc;
use tracing::{debug, info};

/// Engine-wide tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub target_edge: f64,
    pub max_history_length: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            target_edge: DEFAULT_TARGET_EDGE,
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
        }
    }
}

/// Decides, records and reports bets against one catalog.
///
/// All mutable state lives here. `process_bet` takes `&mut self`, so sharing
/// one engine across tasks needs a lock around the whole call.
pub struct BetProcessor {
    catalog: BetCatalog,
    rng: Box<dyn RandomSource>,
    tracker: HouseEdgeTracker,
    history: HistoryWindow,
}

impl BetProcessor {
    /// Create a new bet processor
    pub fn new(catalog: BetCatalog, rng: Box<dyn RandomSource>, settings: EngineSettings) -> Self {
        Self {
            catalog,
            rng,
            tracker: HouseEdgeTracker::new(settings.target_edge),
            history: HistoryWindow::new(settings.max_history_length),
        }
    }

    /// Default catalog and settings with an entropy-seeded RNG
    pub fn with_defaults() -> Result<Self, ConfigurationError> {
        Ok(Self::new(
            BetCatalog::default(),
            Box::new(SystemRandom::from_entropy()?),
            EngineSettings::default(),
        ))
    }

    /// Place one bet and return the settled result
    pub fn process_bet(&mut self, bet_id: BetId) -> GameResult<BetResult> {
        let option = self
            .catalog
            .get(bet_id)
            .ok_or(GameError::InvalidBet(bet_id))?;

        let is_win = OutcomeDecider::decide(self.rng.as_mut(), option);
        let number = NumberSelector::select(self.rng.as_mut(), option, is_win)?;

        let net_result = self.tracker.record_outcome(option, is_win);
        let timestamp = Utc::now();
        self.history.push(HistoryEntry {
            is_win,
            net_amount: net_result,
            timestamp,
        });

        let wheel_slot = match option.numbers {
            NumberStrategy::Wheel { .. } => wheel_slot(number),
            NumberStrategy::Pool { .. } => None,
        };

        debug!(
            bet_id,
            number,
            is_win,
            net_result,
            house_edge = self.tracker.current_edge(),
            "bet processed"
        );

        Ok(BetResult {
            bet_id,
            number,
            wheel_slot,
            is_win,
            stake: option.stake,
            prize: if is_win { option.prize } else { 0.0 },
            net_result,
            house_edge: self.tracker.current_edge(),
            total_staked: self.tracker.total_staked(),
            timestamp,
        })
    }

    /// Read-only statistics snapshot
    pub fn stats(&self) -> HouseStats {
        HouseStats {
            total_staked: self.tracker.total_staked(),
            total_paid_out: self.tracker.total_paid_out(),
            total_retained: self.tracker.total_retained(),
            current_edge: self.tracker.current_edge(),
            target_edge: self.tracker.target_edge(),
            recent_win_rate: self.history.recent_win_rate(),
            bets_placed: self.tracker.bets_placed(),
            history_length: self.history.len(),
        }
    }

    /// Clear accumulators and history. The catalog is untouched.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.history.clear();
        info!("engine statistics reset");
    }

    pub fn catalog(&self) -> &BetCatalog {
        &self.catalog
    }

    /// Recent results, oldest first
    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.history.iter().cloned().collect()
    }

    pub fn bets_placed(&self) -> u64 {
        self.tracker.bets_placed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::rng::ScriptedRandom;

    fn processor_with(value: f64) -> BetProcessor {
        BetProcessor::new(
            BetCatalog::european(),
            Box::new(ScriptedRandom::constant(value)),
            EngineSettings::default(),
        )
    }

    #[test]
    fn test_fixed_low_sample_wins() {
        let mut processor = processor_with(0.05);
        let result = processor.process_bet(10).expect("Processing failed");

        assert!(result.is_win);
        assert_eq!(result.prize, 10.0);
        assert_eq!(result.net_result, 9.0);
        assert_eq!(result.number, 7);
        assert_eq!(result.wheel_slot, wheel_slot(7));
        assert_eq!(result.total_staked, 1.0);
    }

    #[test]
    fn test_fixed_high_sample_loses() {
        let mut processor = processor_with(0.5);
        let result = processor.process_bet(10).expect("Processing failed");

        assert!(!result.is_win);
        assert_eq!(result.prize, 0.0);
        assert_eq!(result.net_result, -1.0);
        assert!(![7, 17, 27, 32].contains(&result.number));
        assert_eq!(result.house_edge, 1.0);
    }

    #[test]
    fn test_unknown_bet_is_surfaced() {
        let mut processor = processor_with(0.05);
        assert_eq!(processor.process_bet(25), Err(GameError::InvalidBet(25)));
        assert_eq!(processor.bets_placed(), 0);
        assert_eq!(processor.stats().history_length, 0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut processor = processor_with(0.05);
        for _ in 0..5 {
            processor.process_bet(50).unwrap();
        }
        processor.reset();

        let stats = processor.stats();
        assert_eq!(stats.total_staked, 0.0);
        assert_eq!(stats.total_paid_out, 0.0);
        assert_eq!(stats.total_retained, 0.0);
        assert_eq!(stats.current_edge, 0.0);
        assert_eq!(stats.recent_win_rate, 0.0);
        assert_eq!(stats.target_edge, DEFAULT_TARGET_EDGE);
        assert_eq!(processor.catalog().len(), 3);
    }

    #[test]
    fn test_legacy_catalog_has_no_wheel_slot() {
        let mut processor = BetProcessor::new(
            BetCatalog::legacy(),
            Box::new(ScriptedRandom::constant(0.5)),
            EngineSettings::default(),
        );
        let result = processor.process_bet(100).unwrap();
        assert_eq!(result.number, 51);
        assert_eq!(result.wheel_slot, None);
    }
}
