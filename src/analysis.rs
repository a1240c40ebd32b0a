// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - History Analysis
//
// Consumes RoundRecord history only; never touches a live simulation.

use serde::Serialize;

use crate::types::RoundRecord;

/// Rounds that must stay fully cooperative to call a run "fused".
pub const FUSION_WINDOW: usize = 30;

/// Green share a run must exceed to count as converged / stable.
pub const CONVERGENCE_RATIO: f64 = 0.8;

/// Maximum second-half volatility (std of the green share) for stability.
pub const STABILITY_MAX_STD: f64 = 0.1;

// ─── Statistics ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    /// Sample statistics with a normal-approximation 95% CI.
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

/// Population standard deviation (divide by n), 0.0 when empty.
pub fn population_std(samples: &[f64]) -> f64 {
    if samples.is_empty() { return 0.0; }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    var.sqrt()
}

// ─── Evolution Summary ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvolutionSummary {
    pub rounds: usize,
    pub population_size: u32,
    pub initial_cooperate: u32,
    pub final_cooperate: u32,
    pub final_ratio: f64,
    /// Green counts sampled every 10th round.
    pub trajectory: Vec<u32>,
    pub second_half_mean_ratio: f64,
    pub second_half_std_ratio: f64,
    pub fused: bool,
    /// First round after which the population never left all-Cooperate.
    pub fusion_round: Option<u64>,
}

impl EvolutionSummary {
    pub fn from_history(history: &[RoundRecord]) -> Self {
        let population_size = history.first().map(|r| r.total()).unwrap_or(0);
        let final_record = history.last();
        let n = population_size.max(1) as f64;

        let half = &history[history.len() / 2..];
        let half_ratios: Vec<f64> = half.iter().map(|r| r.cooperate_count as f64 / n).collect();
        let second_half_mean_ratio = if half_ratios.is_empty() {
            0.0
        } else {
            half_ratios.iter().sum::<f64>() / half_ratios.len() as f64
        };

        Self {
            rounds: history.len(),
            population_size,
            initial_cooperate: history.first().map(|r| r.cooperate_count).unwrap_or(0),
            final_cooperate: final_record.map(|r| r.cooperate_count).unwrap_or(0),
            final_ratio: final_record.map(|r| r.cooperate_ratio()).unwrap_or(0.0),
            trajectory: history.iter().step_by(10).map(|r| r.cooperate_count).collect(),
            second_half_mean_ratio,
            second_half_std_ratio: population_std(&half_ratios),
            fused: is_fused(history, FUSION_WINDOW),
            fusion_round: fusion_round(history),
        }
    }

    pub fn converged(&self) -> bool {
        self.final_ratio > CONVERGENCE_RATIO
    }

    pub fn stable(&self) -> bool {
        self.second_half_mean_ratio > CONVERGENCE_RATIO && self.second_half_std_ratio < STABILITY_MAX_STD
    }
}

/// True when the last `window` rounds are all fully cooperative.
pub fn is_fused(history: &[RoundRecord], window: usize) -> bool {
    if window == 0 || history.len() < window {
        return false;
    }
    history[history.len() - window..]
        .iter()
        .all(|r| r.defect_count == 0 && r.cooperate_count > 0)
}

pub fn fusion_round(history: &[RoundRecord]) -> Option<u64> {
    let last_impure = history.iter().rposition(|r| r.defect_count > 0);
    match last_impure {
        None => history.first().map(|r| r.round_index),
        Some(i) => history.get(i + 1).map(|r| r.round_index),
    }
}

/// Number of rounds in which the defect count went up.
pub fn defect_increases(history: &[RoundRecord]) -> usize {
    history.windows(2).filter(|w| w[1].defect_count > w[0].defect_count).count()
}
