// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Open vs Closed Feedback Loop
//
// Two organisations face the same stream of external pressure. The open one
// learns from it, the closed one hardens. Both are scored with the resonance
// formulas every iteration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::formula::SystemMetrics;

const OPEN_LEARNING_RATE: f64 = 0.05;
const CLOSED_DEFENSIVE_RESPONSE: f64 = 0.08;

const BASE_PRESSURE: f64 = 0.1;
const SHOCK_PROBABILITY: f64 = 0.1;
const SHOCK_SIZE: f64 = 0.3;
const PRESSURE_NOISE_SD: f64 = 0.05;

/// Ratio denominators never drop below this.
const RATIO_FLOOR: f64 = 0.01;

// ---------------------------------------------------------------------------
// System dynamics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    /// Transparent, participatory, authentic.
    Open,
    /// Defensive, hierarchical, opaque.
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSystem {
    pub kind: SystemKind,
    pub metrics: SystemMetrics,
}

impl FeedbackSystem {
    pub fn open() -> Self {
        Self {
            kind: SystemKind::Open,
            metrics: SystemMetrics {
                authenticity: 0.9,
                participation: 0.85,
                transparency: 0.9,
                hierarchy_defensivity: 0.1,
            },
        }
    }

    pub fn closed() -> Self {
        Self {
            kind: SystemKind::Closed,
            metrics: SystemMetrics {
                authenticity: 0.3,
                participation: 0.2,
                transparency: 0.15,
                hierarchy_defensivity: 0.85,
            },
        }
    }

    pub fn with_metrics(kind: SystemKind, metrics: SystemMetrics) -> Result<Self, ConfigError> {
        metrics.validate()?;
        Ok(Self { kind, metrics })
    }

    /// Advance one timestep under `pressure` in [0, 1].
    pub fn iterate(&mut self, pressure: f64) -> SystemMetrics {
        let m = &mut self.metrics;
        match self.kind {
            SystemKind::Open => {
                let lr = OPEN_LEARNING_RATE;
                let raised = m.hierarchy_defensivity + pressure * 0.1;
                m.hierarchy_defensivity = (raised * (1.0 - lr * m.authenticity)).min(1.0);
                m.participation = (m.participation + lr * m.transparency).min(1.0);
                m.authenticity = (m.authenticity + lr * m.participation * 0.3).min(1.0);
                m.transparency = (m.transparency + lr * m.authenticity * 0.2).min(1.0);
            }
            SystemKind::Closed => {
                let r = CLOSED_DEFENSIVE_RESPONSE;
                m.hierarchy_defensivity = (m.hierarchy_defensivity + pressure * r).min(1.0);
                m.participation = (m.participation - r * m.hierarchy_defensivity).max(0.0);
                m.authenticity = (m.authenticity - r * m.hierarchy_defensivity * 0.5).max(0.0);
                m.transparency = (m.transparency - r * m.hierarchy_defensivity * 0.3).max(0.0);
            }
        }
        *m
    }
}

// ---------------------------------------------------------------------------
// External pressure
// ---------------------------------------------------------------------------

/// Base pressure plus occasional shocks and Gaussian noise, clamped to [0, 1].
pub fn sample_pressure<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let shock = if rng.gen::<f64>() < SHOCK_PROBABILITY { SHOCK_SIZE } else { 0.0 };
    let noise = standard_normal(rng) * PRESSURE_NOISE_SD;
    (BASE_PRESSURE + shock + noise).clamp(0.0, 1.0)
}

pub fn generate_pressures<R: Rng + ?Sized>(rng: &mut R, iterations: usize) -> Vec<f64> {
    (0..iterations).map(|_| sample_pressure(rng)).collect()
}

/// Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - U keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

// ---------------------------------------------------------------------------
// Comparative run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct IterationMetrics {
    pub iteration: usize,
    pub metrics: SystemMetrics,
    pub effectiveness: f64,
    pub resilience: f64,
    pub innovation: f64,
}

impl IterationMetrics {
    fn score(iteration: usize, metrics: SystemMetrics) -> Self {
        Self {
            iteration,
            metrics,
            effectiveness: metrics.effectiveness(),
            resilience: metrics.resilience(),
            innovation: metrics.innovation_potential(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackHistory {
    pub open_system: Vec<IterationMetrics>,
    pub closed_system: Vec<IterationMetrics>,
    pub external_pressures: Vec<f64>,
}

/// Drive an open and a closed system through the same pressure sequence.
pub fn run_comparison<R: Rng + ?Sized>(rng: &mut R, iterations: usize) -> FeedbackHistory {
    let pressures = generate_pressures(rng, iterations);
    run_with_pressures(FeedbackSystem::open(), FeedbackSystem::closed(), &pressures)
}

pub fn run_with_pressures(
    mut open: FeedbackSystem,
    mut closed: FeedbackSystem,
    pressures: &[f64],
) -> FeedbackHistory {
    let mut open_system = Vec::with_capacity(pressures.len());
    let mut closed_system = Vec::with_capacity(pressures.len());
    for (i, &pressure) in pressures.iter().enumerate() {
        open_system.push(IterationMetrics::score(i, open.iterate(pressure)));
        closed_system.push(IterationMetrics::score(i, closed.iterate(pressure)));
    }
    FeedbackHistory {
        open_system,
        closed_system,
        external_pressures: pressures.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// One line of the exported comparison: `{open, closed, ratio}`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MetricComparison {
    pub open: f64,
    pub closed: f64,
    pub ratio: f64,
}

impl MetricComparison {
    pub fn new(open: f64, closed: f64) -> Self {
        Self { open, closed, ratio: open / closed.max(RATIO_FLOOR) }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalStates {
    pub open: Option<SystemMetrics>,
    pub closed: Option<SystemMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackAnalysis {
    pub effectiveness: MetricComparison,
    pub resilience: MetricComparison,
    pub innovation: MetricComparison,
    pub final_state: FinalStates,
}

impl FeedbackAnalysis {
    pub fn open_dominates(&self) -> bool {
        self.effectiveness.ratio > 1.0 && self.resilience.ratio > 1.0 && self.innovation.ratio > 1.0
    }
}

pub fn analyze(history: &FeedbackHistory) -> FeedbackAnalysis {
    fn mean(rows: &[IterationMetrics], f: impl Fn(&IterationMetrics) -> f64) -> f64 {
        if rows.is_empty() { return 0.0; }
        rows.iter().map(f).sum::<f64>() / rows.len() as f64
    }
    let (open, closed) = (&history.open_system, &history.closed_system);

    FeedbackAnalysis {
        effectiveness: MetricComparison::new(mean(open, |m| m.effectiveness), mean(closed, |m| m.effectiveness)),
        resilience: MetricComparison::new(mean(open, |m| m.resilience), mean(closed, |m| m.resilience)),
        innovation: MetricComparison::new(mean(open, |m| m.innovation), mean(closed, |m| m.innovation)),
        final_state: FinalStates {
            open: open.last().map(|m| m.metrics),
            closed: closed.last().map(|m| m.metrics),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pressures_are_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let pressures = generate_pressures(&mut rng, 1000);
        assert!(pressures.iter().all(|p| (0.0..=1.0).contains(p)));
        let mean = pressures.iter().sum::<f64>() / pressures.len() as f64;
        // 0.1 base + 0.1 * 0.3 expected shock
        assert!((mean - 0.13).abs() < 0.02, "mean pressure {}", mean);
    }

    #[test]
    fn test_open_system_stays_in_range() {
        let mut sys = FeedbackSystem::open();
        for _ in 0..200 {
            let m = sys.iterate(1.0);
            assert!(m.validate().is_ok(), "{:?}", m);
        }
    }

    #[test]
    fn test_closed_system_decays_under_pressure() {
        let mut sys = FeedbackSystem::closed();
        let before = sys.metrics;
        let after = sys.iterate(0.5);
        assert!(after.participation < before.participation);
        assert!(after.hierarchy_defensivity > before.hierarchy_defensivity);
        for _ in 0..100 {
            sys.iterate(0.5);
        }
        assert_eq!(sys.metrics.participation, 0.0);
        assert_eq!(sys.metrics.hierarchy_defensivity, 1.0);
    }

    #[test]
    fn test_open_outperforms_closed() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let history = run_comparison(&mut rng, 100);
        assert_eq!(history.open_system.len(), 100);
        assert_eq!(history.external_pressures.len(), 100);

        let analysis = analyze(&history);
        assert!(analysis.open_dominates());
        assert!(analysis.final_state.open.is_some());
    }

    #[test]
    fn test_ratio_floor() {
        let c = MetricComparison::new(0.5, 0.0);
        assert!((c.ratio - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_analysis_json_shape() {
        let history = run_with_pressures(FeedbackSystem::open(), FeedbackSystem::closed(), &[0.1, 0.2]);
        let json = serde_json::to_value(analyze(&history)).unwrap();
        for key in ["effectiveness", "resilience", "innovation"] {
            let entry = &json[key];
            assert!(entry["open"].is_number());
            assert!(entry["closed"].is_number());
            assert!(entry["ratio"].is_number());
        }
    }
}
