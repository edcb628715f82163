//! Displayed-number selection
//!
//! The number is cosmetic. It is chosen after the decision and is never
//! used to re-derive or check it.

use crate::errors::ConfigurationError;
use crate::games::catalog::validate_strategy;
use crate::games::rng::RandomSource;
use crate::games::types::{BetOption, NumberStrategy, WHEEL_SIZE};

/// Picks the number shown to the player
pub struct NumberSelector;

impl NumberSelector {
    pub fn select(
        rng: &mut dyn RandomSource,
        option: &BetOption,
        is_win: bool,
    ) -> Result<u32, ConfigurationError> {
        validate_strategy(&option.numbers).map_err(|reason| {
            ConfigurationError::invalid(format!("bets[{}].numbers", option.id), option.numbers.name(), reason)
        })?;

        match &option.numbers {
            // Pool draws ignore the decision entirely.
            NumberStrategy::Pool { pool_size } => {
                Ok(rng.next_index(*pool_size as usize) as u32 + 1)
            }
            NumberStrategy::Wheel { winning_numbers } => {
                let candidates: Vec<u8> = if is_win {
                    winning_numbers.clone()
                } else {
                    (0..WHEEL_SIZE)
                        .filter(|n| !winning_numbers.contains(n))
                        .collect()
                };
                let pick = candidates[rng.next_index(candidates.len())];
                Ok(u32::from(pick))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::rng::{ScriptedRandom, SystemRandom};

    fn wheel_bet(numbers: Vec<u8>) -> BetOption {
        BetOption::new(10, 1.0, 10.0, 0.0973, NumberStrategy::Wheel { winning_numbers: numbers })
    }

    #[test]
    fn test_wheel_partition_consistency() {
        let bet = wheel_bet(vec![7, 17, 27, 32]);
        let mut rng = SystemRandom::seeded(11);
        for _ in 0..2_000 {
            let win = NumberSelector::select(&mut rng, &bet, true).unwrap();
            assert!([7, 17, 27, 32].contains(&win));

            let loss = NumberSelector::select(&mut rng, &bet, false).unwrap();
            assert!(loss < 37);
            assert!(![7, 17, 27, 32].contains(&loss));
        }
    }

    #[test]
    fn test_wheel_loss_covers_complement() {
        let bet = wheel_bet(vec![0]);
        let mut rng = SystemRandom::seeded(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5_000 {
            seen.insert(NumberSelector::select(&mut rng, &bet, false).unwrap());
        }
        assert_eq!(seen.len(), 36);
        assert!(!seen.contains(&0));
    }

    #[test]
    fn test_pool_range() {
        let bet = BetOption::new(50, 1.0, 50.0, 0.01946, NumberStrategy::Pool { pool_size: 50 });
        let mut rng = SystemRandom::seeded(3);
        for is_win in [true, false] {
            for _ in 0..1_000 {
                let n = NumberSelector::select(&mut rng, &bet, is_win).unwrap();
                assert!((1..=50).contains(&n));
            }
        }
    }

    #[test]
    fn test_pool_scripted_edges() {
        let bet = BetOption::new(10, 1.0, 10.0, 0.0973, NumberStrategy::Pool { pool_size: 10 });
        let mut rng = ScriptedRandom::new(vec![0.0, 0.999]).unwrap();
        assert_eq!(NumberSelector::select(&mut rng, &bet, true).unwrap(), 1);
        assert_eq!(NumberSelector::select(&mut rng, &bet, false).unwrap(), 10);
    }

    #[test]
    fn test_rejects_empty_winning_set() {
        let mut rng = ScriptedRandom::constant(0.3);
        let err = NumberSelector::select(&mut rng, &wheel_bet(vec![]), true).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_full_wheel() {
        let mut rng = ScriptedRandom::constant(0.3);
        let bet = wheel_bet((0..WHEEL_SIZE).collect());
        assert!(NumberSelector::select(&mut rng, &bet, false).is_err());
    }
}
