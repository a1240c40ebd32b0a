// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Payoff Table & Pairwise Scoring

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::types::Strategy;

// ---------------------------------------------------------------------------
// Payoff matrix
// ---------------------------------------------------------------------------

/// Prisoner's-dilemma style payoffs keyed by (self, other).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PayoffMatrix {
    /// Both cooperate.
    pub mutual_cooperation: f64,
    /// Both defect.
    pub mutual_defection: f64,
    /// Self cooperates, other defects.
    pub sucker: f64,
    /// Self defects, other cooperates.
    pub exploitation: f64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::reference()
    }
}

impl PayoffMatrix {
    /// The (3, 1, 0, 4) table used by every reference scenario.
    pub const fn reference() -> Self {
        Self {
            mutual_cooperation: 3.0,
            mutual_defection: 1.0,
            sucker: 0.0,
            exploitation: 4.0,
        }
    }

    pub fn new(mutual_cooperation: f64, mutual_defection: f64, sucker: f64, exploitation: f64) -> Self {
        Self { mutual_cooperation, mutual_defection, sucker, exploitation }
    }

    /// Payoff earned by `me` when playing against `other`.
    /// A Neutral on either side earns nothing.
    pub fn payoff(&self, me: Strategy, other: Strategy) -> f64 {
        match (me, other) {
            (Strategy::Cooperate, Strategy::Cooperate) => self.mutual_cooperation,
            (Strategy::Defect, Strategy::Defect) => self.mutual_defection,
            (Strategy::Cooperate, Strategy::Defect) => self.sucker,
            (Strategy::Defect, Strategy::Cooperate) => self.exploitation,
            _ => 0.0,
        }
    }

    /// Payoffs for both sides of one encounter: `(to_a, to_b)`.
    pub fn play(&self, a: Strategy, b: Strategy) -> (f64, f64) {
        (self.payoff(a, b), self.payoff(b, a))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            ("mutual_cooperation", self.mutual_cooperation),
            ("mutual_defection", self.mutual_defection),
            ("sucker", self.sucker),
            ("exploitation", self.exploitation),
        ];
        for (name, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPayoff { name, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Round-robin scoring
// ---------------------------------------------------------------------------

/// Score every unordered pair (i < j) exactly once.
///
/// Returns one accumulated score per agent, in population order. Populations
/// with fewer than two agents score all zeros.
pub fn score_round_robin(strategies: &[Strategy], payoffs: &PayoffMatrix) -> Vec<f64> {
    let n = strategies.len();
    let mut scores = vec![0.0; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let (to_i, to_j) = payoffs.play(strategies[i], strategies[j]);
            scores[i] += to_i;
            scores[j] += to_j;
        }
    }
    scores
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean_score(scores: &[f64]) -> f64 {
    if scores.is_empty() { return 0.0; }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Highest score, 0.0 for an empty slice.
pub fn best_score(scores: &[f64]) -> f64 {
    scores.iter().cloned().reduce(f64::max).unwrap_or(0.0)
}
