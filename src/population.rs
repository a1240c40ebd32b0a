// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Population State

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::types::{RoundRecord, Strategy};

/// Fixed-size ordered strategy labels. Index identity is agent identity.
///
/// Serialized as a bare list of strategies. Deserializing goes through
/// [`Population::from_strategies`], so an empty or Neutral-bearing list is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Strategy>", into = "Vec<Strategy>")]
pub struct Population {
    strategies: Vec<Strategy>,
}

/// Every agent starts with `initial_strategy`.
pub fn initialize_population(size: usize, initial_strategy: Strategy) -> Result<Population, ConfigError> {
    Population::with_defectors(size, initial_strategy, 0)
}

impl Population {
    /// Agents `0..defectors` start as Defect, the rest as `initial_strategy`.
    pub fn with_defectors(
        size: usize,
        initial_strategy: Strategy,
        defectors: usize,
    ) -> Result<Self, ConfigError> {
        if size < 1 {
            return Err(ConfigError::InvalidPopulation(size));
        }
        if initial_strategy == Strategy::Neutral {
            return Err(ConfigError::InvalidInitialStrategy(initial_strategy));
        }
        if defectors > size {
            return Err(ConfigError::TooManyDefectors { count: defectors, size });
        }
        let strategies = (0..size)
            .map(|i| if i < defectors { Strategy::Defect } else { initial_strategy })
            .collect();
        Ok(Self { strategies })
    }

    /// Wrap an explicit assignment.
    pub fn from_strategies(strategies: Vec<Strategy>) -> Result<Self, ConfigError> {
        let population = Self { strategies };
        population.validate()?;
        Ok(population)
    }

    /// Non-empty and only Cooperate/Defect, so round counts always sum to N.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::InvalidPopulation(0));
        }
        if self.strategies.contains(&Strategy::Neutral) {
            return Err(ConfigError::InvalidInitialStrategy(Strategy::Neutral));
        }
        Ok(())
    }

    /// Internal: the next generation produced by an update rule.
    pub(crate) fn next_generation(&self, strategies: Vec<Strategy>) -> Self {
        debug_assert_eq!(strategies.len(), self.strategies.len());
        Self { strategies }
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn get(&self, agent: usize) -> Option<Strategy> {
        self.strategies.get(agent).copied()
    }

    pub fn cooperate_count(&self) -> u32 {
        self.strategies.iter().filter(|s| s.is_cooperate()).count() as u32
    }

    pub fn defect_count(&self) -> u32 {
        self.strategies.iter().filter(|s| s.is_defect()).count() as u32
    }

    pub fn record(&self, round_index: u64) -> RoundRecord {
        RoundRecord {
            round_index,
            cooperate_count: self.cooperate_count(),
            defect_count: self.defect_count(),
        }
    }
}

impl TryFrom<Vec<Strategy>> for Population {
    type Error = ConfigError;

    fn try_from(strategies: Vec<Strategy>) -> Result<Self, ConfigError> {
        Self::from_strategies(strategies)
    }
}

impl From<Population> for Vec<Strategy> {
    fn from(population: Population) -> Self {
        population.strategies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_all_cooperate() {
        let pop = initialize_population(50, Strategy::Cooperate).unwrap();
        assert_eq!(pop.len(), 50);
        assert_eq!(pop.cooperate_count(), 50);
        assert_eq!(pop.defect_count(), 0);
    }

    #[test]
    fn test_initialize_rejects_empty() {
        assert!(matches!(
            initialize_population(0, Strategy::Cooperate),
            Err(ConfigError::InvalidPopulation(0))
        ));
    }

    #[test]
    fn test_with_defectors_prefix() {
        let pop = Population::with_defectors(5, Strategy::Cooperate, 2).unwrap();
        assert_eq!(pop.get(0), Some(Strategy::Defect));
        assert_eq!(pop.get(1), Some(Strategy::Defect));
        assert_eq!(pop.get(2), Some(Strategy::Cooperate));
        assert_eq!(pop.get(5), None);

        let record = pop.record(7);
        assert_eq!(record.round_index, 7);
        assert_eq!(record.cooperate_count, 3);
        assert_eq!(record.defect_count, 2);
    }

    #[test]
    fn test_from_strategies_rejects_empty() {
        assert!(Population::from_strategies(Vec::new()).is_err());
    }

    #[test]
    fn test_validate_rejects_uncountable_agents() {
        let pop = Population { strategies: vec![Strategy::Cooperate, Strategy::Neutral] };
        assert!(matches!(pop.validate(), Err(ConfigError::InvalidInitialStrategy(Strategy::Neutral))));
        let empty = Population { strategies: Vec::new() };
        assert!(matches!(empty.validate(), Err(ConfigError::InvalidPopulation(0))));
    }

    #[test]
    fn test_deserialize_goes_through_checks() {
        let pop: Population = serde_json::from_str(r#"["cooperate","defect","cooperate"]"#).unwrap();
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.defect_count(), 1);
        assert_eq!(serde_json::to_string(&pop).unwrap(), r#"["cooperate","defect","cooperate"]"#);

        assert!(serde_json::from_str::<Population>("[]").is_err());
        assert!(serde_json::from_str::<Population>(r#"["cooperate","neutral","defect"]"#).is_err());
    }
}
