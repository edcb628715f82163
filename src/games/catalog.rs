//! Static table of bet configurations
//!
//! A catalog is validated once, when it is built. Anything malformed is a
//! `ConfigurationError` at startup rather than a per-bet failure.

use crate::errors::ConfigurationError;
use crate::games::types::{BetId, BetOption, NumberStrategy, WHEEL_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Pocket order on a European wheel, clockwise from zero
pub const EUROPEAN_WHEEL_ORDER: [u8; WHEEL_SIZE as usize] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Index of `number` on the physical wheel
pub fn wheel_slot(number: u32) -> Option<usize> {
    EUROPEAN_WHEEL_ORDER
        .iter()
        .position(|&pocket| u32::from(pocket) == number)
}

/// Built-in catalogs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogPreset {
    /// Wheel-partition numbers over the 37-pocket wheel
    #[default]
    European,
    /// Pool-modulo numbers, one pool per bet
    Legacy,
}

impl fmt::Display for CatalogPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogPreset::European => write!(f, "european"),
            CatalogPreset::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for CatalogPreset {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "european" => Ok(CatalogPreset::European),
            "legacy" => Ok(CatalogPreset::Legacy),
            other => Err(ConfigurationError::invalid(
                "engine.preset",
                other,
                "expected 'european' or 'legacy'",
            )),
        }
    }
}

/// Immutable set of bet options, looked up by id
#[derive(Debug, Clone, PartialEq)]
pub struct BetCatalog {
    options: Vec<BetOption>,
}

impl BetCatalog {
    /// Validate and build a catalog
    pub fn new(options: Vec<BetOption>) -> Result<Self, ConfigurationError> {
        if options.is_empty() {
            return Err(ConfigurationError::MissingRequired("bets".to_string()));
        }

        let mut seen = HashSet::new();
        let mut options = options;
        for option in &mut options {
            if !seen.insert(option.id) {
                return Err(ConfigurationError::invalid(
                    "bets.id",
                    option.id,
                    "duplicate bet identifier",
                ));
            }
            validate_option(option)?;
            if option.label.is_empty() {
                option.label = format!("{}€ → {}€", option.stake, option.prize);
            }
        }

        Ok(Self { options })
    }

    /// Default catalog: wheel-partition numbers on a European wheel
    pub fn european() -> Self {
        Self {
            options: vec![
                BetOption::new(10, 1.0, 10.0, 0.0973, wheel(&[7, 17, 27, 32])),
                BetOption::new(50, 1.0, 50.0, 0.01946, wheel(&[17])),
                BetOption::new(100, 1.0, 100.0, 0.00973, wheel(&[0])),
            ],
        }
    }

    /// Pool-modulo catalog with one number pool per prize tier
    pub fn legacy() -> Self {
        Self {
            options: vec![
                BetOption::new(10, 1.0, 10.0, 0.0973, NumberStrategy::Pool { pool_size: 10 }),
                BetOption::new(50, 1.0, 50.0, 0.01946, NumberStrategy::Pool { pool_size: 50 }),
                BetOption::new(100, 1.0, 100.0, 0.00973, NumberStrategy::Pool { pool_size: 100 }),
            ],
        }
    }

    pub fn from_preset(preset: CatalogPreset) -> Self {
        match preset {
            CatalogPreset::European => Self::european(),
            CatalogPreset::Legacy => Self::legacy(),
        }
    }

    pub fn get(&self, id: BetId) -> Option<&BetOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn options(&self) -> &[BetOption] {
        &self.options
    }

    pub fn ids(&self) -> Vec<BetId> {
        self.options.iter().map(|option| option.id).collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Default for BetCatalog {
    fn default() -> Self {
        Self::european()
    }
}

fn wheel(numbers: &[u8]) -> NumberStrategy {
    NumberStrategy::Wheel {
        winning_numbers: numbers.to_vec(),
    }
}

fn validate_option(option: &BetOption) -> Result<(), ConfigurationError> {
    let field = |name: &str| format!("bets[{}].{}", option.id, name);

    if !(option.stake > 0.0 && option.stake.is_finite()) {
        return Err(ConfigurationError::invalid(field("stake"), option.stake, "stake must be positive"));
    }
    if !(option.prize > option.stake && option.prize.is_finite()) {
        return Err(ConfigurationError::invalid(
            field("prize"),
            option.prize,
            "prize must exceed the stake",
        ));
    }
    if !(option.target_probability > 0.0 && option.target_probability < 1.0) {
        return Err(ConfigurationError::invalid(
            field("target_probability"),
            option.target_probability,
            "probability must lie strictly between 0 and 1",
        ));
    }

    validate_strategy(&option.numbers).map_err(|reason| {
        ConfigurationError::invalid(field("numbers"), option.numbers.name(), reason)
    })
}

/// Structural checks shared by catalog validation and number selection
pub(crate) fn validate_strategy(strategy: &NumberStrategy) -> Result<(), &'static str> {
    match strategy {
        NumberStrategy::Pool { pool_size } => {
            if *pool_size == 0 {
                return Err("pool size must be at least 1");
            }
        }
        NumberStrategy::Wheel { winning_numbers } => {
            if winning_numbers.is_empty() {
                return Err("winning number set is empty");
            }
            let mut seen = HashSet::new();
            for &number in winning_numbers {
                if number >= WHEEL_SIZE {
                    return Err("winning numbers must be between 0 and 36");
                }
                if !seen.insert(number) {
                    return Err("winning numbers must be unique");
                }
            }
            if seen.len() >= WHEEL_SIZE as usize {
                return Err("winning numbers cover the whole wheel, a loss has no number");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in [CatalogPreset::European, CatalogPreset::Legacy] {
            let catalog = BetCatalog::from_preset(preset);
            let rebuilt = BetCatalog::new(catalog.options().to_vec()).expect("preset must validate");
            assert_eq!(rebuilt, catalog);
            assert_eq!(catalog.ids(), vec![10, 50, 100]);
        }
    }

    #[test]
    fn test_wheel_order_is_a_permutation() {
        let mut pockets = EUROPEAN_WHEEL_ORDER.to_vec();
        pockets.sort_unstable();
        assert_eq!(pockets, (0..WHEEL_SIZE).collect::<Vec<_>>());
        assert_eq!(wheel_slot(0), Some(0));
        assert_eq!(wheel_slot(26), Some(36));
        assert_eq!(wheel_slot(37), None);
    }

    #[test]
    fn test_lookup() {
        let catalog = BetCatalog::european();
        assert_eq!(catalog.get(50).map(|o| o.prize), Some(50.0));
        assert!(catalog.get(25).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut options = BetCatalog::legacy().options().to_vec();
        options.push(options[0].clone());
        assert!(matches!(
            BetCatalog::new(options),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(
            BetCatalog::new(vec![]),
            Err(ConfigurationError::MissingRequired("bets".to_string()))
        );
    }

    #[test]
    fn test_rejects_bad_amounts() {
        let pool = NumberStrategy::Pool { pool_size: 10 };
        assert!(BetCatalog::new(vec![BetOption::new(1, 0.0, 10.0, 0.1, pool.clone())]).is_err());
        assert!(BetCatalog::new(vec![BetOption::new(1, 5.0, 5.0, 0.1, pool.clone())]).is_err());
        assert!(BetCatalog::new(vec![BetOption::new(1, 1.0, 10.0, 0.0, pool.clone())]).is_err());
        assert!(BetCatalog::new(vec![BetOption::new(1, 1.0, 10.0, 1.0, pool)]).is_err());
    }

    #[test]
    fn test_rejects_bad_wheel_sets() {
        let bet = |numbers: Vec<u8>| {
            BetOption::new(1, 1.0, 10.0, 0.1, NumberStrategy::Wheel { winning_numbers: numbers })
        };
        assert!(BetCatalog::new(vec![bet(vec![])]).is_err());
        assert!(BetCatalog::new(vec![bet(vec![37])]).is_err());
        assert!(BetCatalog::new(vec![bet(vec![3, 3])]).is_err());
        assert!(BetCatalog::new(vec![bet((0..WHEEL_SIZE).collect())]).is_err());
        assert!(BetCatalog::new(vec![bet((0..36).collect())]).is_ok());
    }

    #[test]
    fn test_rejects_zero_pool() {
        let option = BetOption::new(1, 1.0, 10.0, 0.1, NumberStrategy::Pool { pool_size: 0 });
        assert!(BetCatalog::new(vec![option]).is_err());
    }

    #[test]
    fn test_fills_missing_labels() {
        let mut option = BetOption::new(3, 2.0, 20.0, 0.05, NumberStrategy::Pool { pool_size: 20 });
        option.label.clear();
        let catalog = BetCatalog::new(vec![option]).unwrap();
        assert_eq!(catalog.options()[0].label, "2€ → 20€");
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("Legacy".parse::<CatalogPreset>(), Ok(CatalogPreset::Legacy));
        assert!("american".parse::<CatalogPreset>().is_err());
    }
}
