// Scenario Definitions — the four evolution hypotheses plus baselines
// Every scenario is a SimConfig plus the criteria a single run must meet

use resonance_engine::analysis::EvolutionSummary;
use resonance_engine::config::DEFAULT_POPULATION;
use resonance_engine::{SimConfig, TransparencyParams, Variant};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: String,
    pub label: String,
    pub category: &'static str,
    pub config: SimConfig,
    pub criteria: PassCriteria,
}

#[derive(Debug, Clone, Default)]
pub struct PassCriteria {
    pub min_final_ratio: Option<f64>,
    pub max_final_ratio: Option<f64>,
    pub min_second_half_mean: Option<f64>,
    pub max_second_half_std: Option<f64>,
    pub require_fusion: bool,
    pub require_monotone_defect_decline: bool,
}

impl PassCriteria {
    /// Check one run. Count conservation is always required.
    pub fn evaluate(&self, summary: &EvolutionSummary, defect_increases: usize, counts_conserved: bool) -> bool {
        let mut pass = counts_conserved;
        if let Some(min) = self.min_final_ratio {
            pass &= summary.final_ratio > min;
        }
        if let Some(max) = self.max_final_ratio {
            pass &= summary.final_ratio <= max;
        }
        if let Some(min) = self.min_second_half_mean {
            pass &= summary.second_half_mean_ratio > min;
        }
        if let Some(max) = self.max_second_half_std {
            pass &= summary.second_half_std_ratio < max;
        }
        if self.require_fusion {
            pass &= summary.fused;
        }
        if self.require_monotone_defect_decline {
            pass &= defect_increases == 0;
        }
        pass
    }
}

impl Scenario {
    /// Wrap a user-supplied config. Only count conservation is checked.
    pub fn custom(config: SimConfig) -> Self {
        Self {
            name: "CUSTOM".into(),
            label: format!("Custom ({})", config.variant.name()),
            category: "custom",
            config,
            criteria: PassCriteria::default(),
        }
    }
}

// ─── Scenario Builders ──────────────────────────────────────────────────────

fn evolution(rounds: u64, variant: Variant, initial_defectors: usize) -> SimConfig {
    SimConfig {
        population_size: DEFAULT_POPULATION,
        rounds,
        variant,
        initial_defectors,
        ..SimConfig::default()
    }
}

/// Threshold equivalent to a mean of 2 per opponent in a round robin of `n`.
pub fn per_opponent_threshold(n: usize) -> f64 {
    2.0 * n.saturating_sub(1) as f64
}

pub fn scenarios() -> Vec<Scenario> {
    let mut recovery = evolution(100, Variant::TransparencyDriven, DEFAULT_POPULATION);
    recovery.transparency = TransparencyParams {
        decline_threshold: per_opponent_threshold(DEFAULT_POPULATION),
        ..TransparencyParams::default()
    };

    vec![
        Scenario {
            name: "EVO_CONVERGENCE".into(),
            label: "Convergence to Cooperate".into(),
            category: "hypothesis",
            config: evolution(100, Variant::TransparencyDriven, 0),
            criteria: PassCriteria { min_final_ratio: Some(0.8), ..Default::default() },
        },
        Scenario {
            name: "EVO_STABILITY".into(),
            label: "Stability (200 rounds)".into(),
            category: "hypothesis",
            config: evolution(200, Variant::TransparencyDriven, 0),
            criteria: PassCriteria {
                min_second_half_mean: Some(0.8),
                max_second_half_std: Some(0.1),
                ..Default::default()
            },
        },
        Scenario {
            name: "EVO_FUSION".into(),
            label: "Fusion (last 30 rounds)".into(),
            category: "hypothesis",
            config: evolution(200, Variant::TransparencyDriven, 0),
            criteria: PassCriteria { require_fusion: true, ..Default::default() },
        },
        Scenario {
            name: "EVO_IMITATION_STEADY".into(),
            label: "Imitation, all Cooperate".into(),
            category: "baseline",
            config: evolution(100, Variant::Imitation, 0),
            criteria: PassCriteria { min_final_ratio: Some(0.8), ..Default::default() },
        },
        Scenario {
            name: "EVO_IMITATION_INVASION".into(),
            label: "Imitation, 10 Defect invaders".into(),
            category: "baseline",
            config: evolution(100, Variant::Imitation, 10),
            criteria: PassCriteria { max_final_ratio: Some(0.2), ..Default::default() },
        },
        Scenario {
            name: "EVO_TRANSPARENCY_INVASION".into(),
            label: "Transparency, 10 Defect invaders".into(),
            category: "baseline",
            config: evolution(100, Variant::TransparencyDriven, 10),
            criteria: PassCriteria {
                min_final_ratio: Some(0.75),
                require_monotone_defect_decline: true,
                ..Default::default()
            },
        },
        Scenario {
            name: "EVO_RECOVERY_SCALED".into(),
            label: "Recovery from all Defect".into(),
            category: "recovery",
            config: recovery,
            criteria: PassCriteria {
                min_final_ratio: Some(0.45),
                require_monotone_defect_decline: true,
                ..Default::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_validate() {
        for s in scenarios() {
            assert!(s.config.validate().is_ok(), "{}", s.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let all = scenarios();
        let mut names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_per_opponent_threshold() {
        assert_eq!(per_opponent_threshold(50), 98.0);
        assert_eq!(per_opponent_threshold(0), 0.0);
    }
}
