// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Run Configuration
//
// A single evolutionary run is described by a `SimConfig`. Configs can be
// built in code or loaded from TOML; either way `validate()` runs before
// the first round so a bad parameter aborts the whole run up front.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::payoff::PayoffMatrix;
use crate::types::{Strategy, Variant};
use crate::update::{TransparencyParams, UpdateRule};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building or validating a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("population size must be at least 1, got {0}")]
    InvalidPopulation(usize),
    #[error("{count} initial defectors exceed population size {size}")]
    TooManyDefectors { count: usize, size: usize },
    #[error("initial strategy {0:?} cannot seed a population")]
    InvalidInitialStrategy(Strategy),
    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("payoff `{name}` must be finite and non-negative, got {value}")]
    InvalidPayoff { name: &'static str, value: f64 },
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("round count must be positive")]
    InvalidRounds,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reject anything outside [0, 1], NaN included.
pub fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

pub fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

pub const DEFAULT_POPULATION: usize = 50;
pub const DEFAULT_ROUNDS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub population_size: usize,
    pub initial_strategy: Strategy,
    /// Agents `0..initial_defectors` start as Defect regardless of
    /// `initial_strategy`.
    pub initial_defectors: usize,
    pub rounds: u64,
    pub seed: u64,
    pub variant: Variant,
    pub payoffs: PayoffMatrix,
    pub transparency: TransparencyParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION,
            initial_strategy: Strategy::Cooperate,
            initial_defectors: 0,
            rounds: DEFAULT_ROUNDS,
            seed: 0,
            variant: Variant::TransparencyDriven,
            payoffs: PayoffMatrix::default(),
            transparency: TransparencyParams::default(),
        }
    }
}

impl SimConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 1 {
            return Err(ConfigError::InvalidPopulation(self.population_size));
        }
        if self.initial_strategy == Strategy::Neutral {
            return Err(ConfigError::InvalidInitialStrategy(self.initial_strategy));
        }
        if self.initial_defectors > self.population_size {
            return Err(ConfigError::TooManyDefectors {
                count: self.initial_defectors,
                size: self.population_size,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }
        self.payoffs.validate()?;
        self.update_rule().validate()
    }

    /// The update rule selected by `variant`, carrying this config's params.
    pub fn update_rule(&self) -> UpdateRule {
        match self.variant {
            Variant::TransparencyDriven => UpdateRule::TransparencyDriven(self.transparency),
            Variant::Imitation => UpdateRule::Imitation,
        }
    }
}

/// Parses a configuration from a TOML string. Missing keys take defaults.
impl FromStr for SimConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population_size, 50);
        assert_eq!(config.rounds, 100);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: SimConfig = r#"
            population_size = 10
            initial_strategy = "defect"
            variant = "imitation"
            rounds = 25

            [payoffs]
            exploitation = 5.0
            "#
        .parse()
        .unwrap();

        assert_eq!(config.population_size, 10);
        assert_eq!(config.initial_strategy, Strategy::Defect);
        assert_eq!(config.variant, Variant::Imitation);
        assert_eq!(config.rounds, 25);
        assert_eq!(config.payoffs.exploitation, 5.0);
        // untouched fields fall back to the reference table
        assert_eq!(config.payoffs.mutual_cooperation, 3.0);
        assert_eq!(config.update_rule(), UpdateRule::Imitation);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = SimConfig::from_str("population_size = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = SimConfig { population_size: 0, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPopulation(0))));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let config = SimConfig { rounds: 0, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRounds)));
    }

    #[test]
    fn test_rejects_neutral_start() {
        let config = SimConfig { initial_strategy: Strategy::Neutral, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInitialStrategy(Strategy::Neutral))
        ));
    }

    #[test]
    fn test_rejects_too_many_defectors() {
        let config = SimConfig {
            population_size: 4,
            initial_defectors: 5,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyDefectors { count: 5, size: 4 })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut config = SimConfig::default();
        config.transparency.conversion_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "conversion_probability", .. })
        ));

        config.transparency.conversion_probability = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_imitation_ignores_transparency_params() {
        let mut config = SimConfig { variant: Variant::Imitation, ..SimConfig::default() };
        config.transparency.conversion_probability = 7.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_payoff() {
        let mut config = SimConfig::default();
        config.payoffs.sucker = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPayoff { name: "sucker", .. })
        ));
    }
}
