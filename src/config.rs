//! Configuration management for the Ruleta engine
//!
//! TOML file, then environment overrides, then validation. Anything that
//! fails here is fatal at startup.

use crate::errors::ConfigurationError;
use crate::games::catalog::{BetCatalog, CatalogPreset};
use crate::games::history::DEFAULT_MAX_HISTORY_LENGTH;
use crate::games::processor::{BetProcessor, EngineSettings};
use crate::games::rng::SystemRandom;
use crate::games::tracker::DEFAULT_TARGET_EDGE;
use crate::games::types::BetOption;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuletaConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Explicit catalog. Overrides `engine.preset` when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bets: Vec<BetOption>,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Engine section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub target_edge: f64,
    pub max_history_length: usize,
    /// Fixed RNG seed for reproducible runs. Signed so it fits a TOML integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    pub preset: CatalogPreset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_edge: DEFAULT_TARGET_EDGE,
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            seed: None,
            preset: CatalogPreset::European,
        }
    }
}

/// HTTP server section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl RuletaConfig {
    /// Catalog from `bets` when given, otherwise from the preset
    pub fn catalog(&self) -> Result<BetCatalog, ConfigurationError> {
        if self.bets.is_empty() {
            Ok(BetCatalog::from_preset(self.engine.preset))
        } else {
            BetCatalog::new(self.bets.clone())
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            target_edge: self.engine.target_edge,
            max_history_length: self.engine.max_history_length,
        }
    }

    /// Switch to a stock catalog, discarding any explicit `bets`
    pub fn use_preset(&mut self, preset: CatalogPreset) {
        if !self.bets.is_empty() {
            warn!(%preset, dropped = self.bets.len(), "preset selected, ignoring explicit bets");
            self.bets.clear();
        }
        self.engine.preset = preset;
    }

    /// Build an engine from this configuration
    pub fn build_processor(&self) -> Result<BetProcessor, ConfigurationError> {
        Ok(BetProcessor::new(
            self.catalog()?,
            Box::new(SystemRandom::from_seed_option(self.engine.seed.map(|s| s as u64))?),
            self.engine_settings(),
        ))
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> Result<RuletaConfig, ConfigurationError> {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => RuletaConfig::default(),
        };

        apply_env_overrides(&mut config, |key| env::var(key).ok())?;
        validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> Result<RuletaConfig, ConfigurationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, config: &RuletaConfig, path: &str) -> Result<(), ConfigurationError> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)))
    }
}

/// Apply `RULETA_*` overrides read through `lookup`
pub(crate) fn apply_env_overrides<F>(config: &mut RuletaConfig, lookup: F) -> Result<(), ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("RULETA_API_HOST") {
        config.api.host = host;
    }
    if let Some(port) = lookup("RULETA_API_PORT") {
        config.api.port = port
            .parse()
            .map_err(|_| ConfigurationError::invalid("RULETA_API_PORT", &port, "Invalid port number"))?;
    }
    if let Some(seed) = lookup("RULETA_SEED") {
        config.engine.seed = Some(
            seed.parse()
                .map_err(|_| ConfigurationError::invalid("RULETA_SEED", &seed, "Seed must be a 64-bit signed integer"))?,
        );
    }
    if let Some(preset) = lookup("RULETA_PRESET") {
        config.use_preset(preset.parse()?);
    }
    if let Some(len) = lookup("RULETA_MAX_HISTORY") {
        config.engine.max_history_length = len
            .parse()
            .map_err(|_| ConfigurationError::invalid("RULETA_MAX_HISTORY", &len, "Invalid history length"))?;
    }

    Ok(())
}

/// Validate configuration values
pub fn validate(config: &RuletaConfig) -> Result<(), ConfigurationError> {
    if config.api.port == 0 {
        return Err(ConfigurationError::invalid("api.port", 0, "Port cannot be zero"));
    }
    if config.api.host.is_empty() {
        return Err(ConfigurationError::MissingRequired("api.host".to_string()));
    }
    if config.api.request_timeout_secs == 0 {
        return Err(ConfigurationError::invalid(
            "api.request_timeout_secs",
            0,
            "Timeout must be at least 1s",
        ));
    }
    if config.engine.max_history_length == 0 {
        return Err(ConfigurationError::invalid(
            "engine.max_history_length",
            0,
            "History length cannot be zero",
        ));
    }
    if !(0.0..1.0).contains(&config.engine.target_edge) {
        return Err(ConfigurationError::invalid(
            "engine.target_edge",
            config.engine.target_edge,
            "Target edge must be in [0, 1)",
        ));
    }

    config.catalog().map(|_| ())
}

/// Builder pattern for creating configurations
pub struct ConfigBuilder {
    config: RuletaConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RuletaConfig::default(),
        }
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.config.engine.seed = Some(seed);
        self
    }

    pub fn preset(mut self, preset: CatalogPreset) -> Self {
        self.config.engine.preset = preset;
        self
    }

    pub fn bets(mut self, bets: Vec<BetOption>) -> Self {
        self.config.bets = bets;
        self
    }

    pub fn api(mut self, api: ApiConfig) -> Self {
        self.config.api = api;
        self
    }

    pub fn build(self) -> RuletaConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a sample configuration file with the default catalog spelled out
pub fn generate_sample_config(path: &str) -> Result<(), ConfigurationError> {
    let config = ConfigBuilder::new()
        .bets(BetCatalog::european().options().to_vec())
        .build();
    ConfigLoader::new().save(&config, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::NumberStrategy;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = RuletaConfig::default();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.engine.max_history_length, 100);
        assert_eq!(config.engine.target_edge, 0.027);
        assert!(validate(&config).is_ok());
        assert_eq!(config.catalog().unwrap(), BetCatalog::european());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RuletaConfig::default();
        config.api.port = 0;
        assert!(validate(&config).is_err());

        let mut config = RuletaConfig::default();
        config.engine.target_edge = 1.5;
        assert!(validate(&config).is_err());

        let mut config = RuletaConfig::default();
        config.bets = vec![BetOption::new(1, 1.0, 10.0, 0.1, NumberStrategy::Pool { pool_size: 0 })];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("RULETA_API_PORT", "9000"),
            ("RULETA_SEED", "42"),
            ("RULETA_PRESET", "legacy"),
        ]
        .into_iter()
        .collect();

        let mut config = RuletaConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.engine.seed, Some(42));
        assert_eq!(config.engine.preset, CatalogPreset::Legacy);
    }

    #[test]
    fn test_bad_env_override() {
        let mut config = RuletaConfig::default();
        let err = apply_env_overrides(&mut config, |k| (k == "RULETA_API_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
    }

    #[test]
    fn test_save_and_load_config() -> Result<(), ConfigurationError> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let original = ConfigBuilder::new()
            .bets(BetCatalog::legacy().options().to_vec())
            .seed(7)
            .build();

        let loader = ConfigLoader::new();
        loader.save(&original, path)?;
        let content = std::fs::read_to_string(path).unwrap();
        let loaded: RuletaConfig = toml::from_str(&content).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.catalog()?, BetCatalog::legacy());
        Ok(())
    }

    #[test]
    fn test_extreme_seeds_round_trip() -> Result<(), ConfigurationError> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        let loader = ConfigLoader::new();

        for seed in [i64::MAX, i64::MIN, -1] {
            let original = ConfigBuilder::new().seed(seed).build();
            loader.save(&original, path)?;
            let loaded = loader.load_from_file(path)?;
            assert_eq!(loaded.engine.seed, Some(seed));
            assert!(loaded.build_processor().is_ok());
        }
        Ok(())
    }

    #[test]
    fn test_preset_override_replaces_explicit_bets() -> Result<(), ConfigurationError> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        generate_sample_config(path)?;

        let mut config = ConfigLoader::new().load_from_file(path)?;
        assert!(!config.bets.is_empty());

        apply_env_overrides(&mut config, |k| (k == "RULETA_PRESET").then(|| "legacy".to_string()))?;
        assert!(config.bets.is_empty());
        assert_eq!(config.catalog()?, BetCatalog::legacy());

        let mut config = ConfigLoader::new().load_from_file(path)?;
        config.use_preset(CatalogPreset::European);
        assert_eq!(config.catalog()?, BetCatalog::european());
        assert!(validate(&config).is_ok());
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: RuletaConfig = toml::from_str("[engine]\npreset = \"legacy\"\n").unwrap();
        assert_eq!(config.engine.preset, CatalogPreset::Legacy);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.engine.max_history_length, 100);
    }

    #[test]
    fn test_missing_file_fails() {
        let err = ConfigLoader::new().with_path("/nonexistent/ruleta.toml").load().unwrap_err();
        assert!(matches!(err, ConfigurationError::LoadFailed(_)));
    }

    #[test]
    fn test_build_processor_uses_seed() {
        let config = ConfigBuilder::new().seed(3).build();
        let mut a = config.build_processor().unwrap();
        let mut b = config.build_processor().unwrap();
        for _ in 0..20 {
            assert_eq!(a.process_bet(10).unwrap().number, b.process_bet(10).unwrap().number);
        }
    }
}
