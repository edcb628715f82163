pub mod types;
pub mod rng;
pub mod catalog;
pub mod decider;
pub mod selector;
pub mod tracker;
pub mod history;
pub mod processor;
pub mod simulation;

pub use types::*;
pub use rng::{RandomSource, ScriptedRandom, SystemRandom};
pub use catalog::{wheel_slot, BetCatalog, CatalogPreset, EUROPEAN_WHEEL_ORDER};
pub use decider::OutcomeDecider;
pub use selector::NumberSelector;
pub use tracker::HouseEdgeTracker;
pub use history::HistoryWindow;
pub use processor::{BetProcessor, EngineSettings};
pub use simulation::{simulate, SimulationReport};
