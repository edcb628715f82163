//! Error types for the Ruleta engine
//!
//! Two families: configuration faults, which are fatal at startup, and game
//! errors, which surface per call to whoever invoked the engine.

use crate::games::types::BetId;
use thiserror::Error;

/// Configuration and validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Missing required field: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

impl ConfigurationError {
    /// Shorthand for an `InvalidValue` error
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while processing bets
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// Unknown bet identifier. Never defaulted to a loss.
    #[error("Invalid bet type: {0}")]
    InvalidBet(BetId),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Simulation requires at least one round")]
    InvalidRounds,

    #[error("Scripted random source needs at least one sample")]
    EmptyScript,
}

/// Convenience type alias for Results
pub type GameResult<T> = Result<T, GameError>;
