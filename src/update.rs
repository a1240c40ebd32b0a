// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Strategy Update Rules
//
// Both rules are synchronous: they read the strategies and scores of the
// round that just finished and produce the whole next generation at once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{check_finite, check_probability, ConfigError};
use crate::payoff::mean_score;
use crate::types::{Strategy, Variant};

/// Mean score below which the population is "visibly declining".
/// Tied to the reference payoffs (3, 1, 0, 4): it sits between mutual
/// defection and mutual cooperation. Re-derive it when changing the table.
pub const DEFAULT_DECLINE_THRESHOLD: f64 = 2.0;

/// Per-round chance that a Defector switches once decline is visible.
pub const DEFAULT_CONVERSION_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransparencyParams {
    pub decline_threshold: f64,
    pub conversion_probability: f64,
}

impl Default for TransparencyParams {
    fn default() -> Self {
        Self {
            decline_threshold: DEFAULT_DECLINE_THRESHOLD,
            conversion_probability: DEFAULT_CONVERSION_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// Defectors convert to Cooperate with fixed probability when the mean
    /// score drops below the decline threshold.
    TransparencyDriven(TransparencyParams),
    /// Each agent copies a uniformly drawn peer that scored strictly higher.
    Imitation,
}

impl UpdateRule {
    pub fn transparency() -> Self {
        Self::TransparencyDriven(TransparencyParams::default())
    }

    /// Conversion parameters, `None` for imitation.
    pub fn params(&self) -> Option<&TransparencyParams> {
        match self {
            Self::TransparencyDriven(params) => Some(params),
            Self::Imitation => None,
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Self::TransparencyDriven(_) => Variant::TransparencyDriven,
            Self::Imitation => Variant::Imitation,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::TransparencyDriven(params) => {
                check_finite("decline_threshold", params.decline_threshold)?;
                check_probability("conversion_probability", params.conversion_probability)
            }
            Self::Imitation => Ok(()),
        }
    }

    /// Produce the next generation from this round's strategies and scores.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        strategies: &[Strategy],
        scores: &[f64],
        rng: &mut R,
    ) -> Vec<Strategy> {
        debug_assert_eq!(strategies.len(), scores.len());
        match self {
            Self::TransparencyDriven(params) => transparency_update(strategies, scores, params, rng),
            Self::Imitation => imitation_update(strategies, scores, rng),
        }
    }
}

fn transparency_update<R: Rng + ?Sized>(
    strategies: &[Strategy],
    scores: &[f64],
    params: &TransparencyParams,
    rng: &mut R,
) -> Vec<Strategy> {
    let mut next = strategies.to_vec();
    if mean_score(scores) >= params.decline_threshold {
        return next;
    }
    for slot in next.iter_mut() {
        if *slot == Strategy::Defect && rng.gen::<f64>() < params.conversion_probability {
            *slot = Strategy::Cooperate;
        }
    }
    next
}

fn imitation_update<R: Rng + ?Sized>(strategies: &[Strategy], scores: &[f64], rng: &mut R) -> Vec<Strategy> {
    let n = strategies.len();
    let mut next = strategies.to_vec();
    if n == 0 {
        return next;
    }
    for i in 0..n {
        let j = rng.gen_range(0..n);
        if scores[j] > scores[i] {
            next[i] = strategies[j];
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use Strategy::*;

    #[test]
    fn test_transparency_no_conversion_above_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rule = UpdateRule::transparency();
        let strategies = vec![Defect, Cooperate, Cooperate];
        let next = rule.apply(&strategies, &[2.0, 2.0, 2.0], &mut rng);
        assert_eq!(next, strategies);
    }

    #[test]
    fn test_transparency_certain_conversion() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rule = UpdateRule::TransparencyDriven(TransparencyParams {
            decline_threshold: 2.0,
            conversion_probability: 1.0,
        });
        let next = rule.apply(&[Defect, Defect, Cooperate], &[1.0, 1.0, 0.0], &mut rng);
        assert_eq!(next, vec![Cooperate, Cooperate, Cooperate]);
    }

    #[test]
    fn test_transparency_zero_probability_is_inert() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rule = UpdateRule::TransparencyDriven(TransparencyParams {
            decline_threshold: 2.0,
            conversion_probability: 0.0,
        });
        let next = rule.apply(&[Defect, Defect], &[1.0, 1.0], &mut rng);
        assert_eq!(next, vec![Defect, Defect]);
    }

    #[test]
    fn test_transparency_never_creates_defectors() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let rule = UpdateRule::transparency();
        let strategies = vec![Cooperate, Defect, Cooperate, Defect, Defect];
        for _ in 0..50 {
            let next = rule.apply(&strategies, &[0.0; 5], &mut rng);
            for (before, after) in strategies.iter().zip(&next) {
                if *before == Cooperate {
                    assert_eq!(*after, Cooperate);
                }
            }
        }
    }

    #[test]
    fn test_imitation_copies_strictly_better_peer() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // agent 1 outscores everyone, so whoever samples it becomes Defect
        let strategies = vec![Cooperate, Defect];
        let scores = vec![0.0, 4.0];
        let mut saw_switch = false;
        for _ in 0..32 {
            let next = UpdateRule::Imitation.apply(&strategies, &scores, &mut rng);
            assert_eq!(next[1], Defect, "top scorer never switches");
            saw_switch |= next[0] == Defect;
        }
        assert!(saw_switch);
    }

    #[test]
    fn test_imitation_ties_do_not_switch() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let strategies = vec![Cooperate, Defect, Cooperate];
        let next = UpdateRule::Imitation.apply(&strategies, &[1.0, 1.0, 1.0], &mut rng);
        assert_eq!(next, strategies);
    }

    #[test]
    fn test_validate() {
        assert!(UpdateRule::transparency().validate().is_ok());
        assert!(UpdateRule::Imitation.validate().is_ok());
        let bad = UpdateRule::TransparencyDriven(TransparencyParams {
            decline_threshold: f64::NAN,
            conversion_probability: 0.3,
        });
        assert!(matches!(bad.validate(), Err(ConfigError::NonFinite { .. })));
    }
}
