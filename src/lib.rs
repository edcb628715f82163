//! Ruleta - outcome and house-edge engine for a fixed-stake roulette game
//!
//! A bet is looked up in a static catalog, decided against its configured
//! win probability, given a displayed number consistent with that decision,
//! and recorded in running stake/payout totals plus a bounded window of
//! recent results. Rendering, audio and payments belong to callers.
//!
//! ```
//! use ruleta::games::{BetCatalog, BetProcessor, EngineSettings, ScriptedRandom};
//!
//! let mut engine = BetProcessor::new(
//!     BetCatalog::european(),
//!     Box::new(ScriptedRandom::constant(0.05)),
//!     EngineSettings::default(),
//! );
//! let result = engine.process_bet(10).unwrap();
//! assert!(result.is_win);
//! assert_eq!(result.net_result, 9.0);
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod games;

pub use config::{ConfigLoader, RuletaConfig};
pub use errors::{ConfigurationError, GameError, GameResult};
pub use games::{BetCatalog, BetProcessor, BetResult, EngineSettings, HouseStats};
