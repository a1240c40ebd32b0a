// Benchmark Report Types
// Structured output for independent analysis and hypothesis validation

use serde::Serialize;

use resonance_engine::{Stats, UpdateRule};

use crate::metrics::ResonanceComparison;

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub rule: UpdateRule,
    pub population_size: usize,
    pub rounds: u64,
    pub initial_cooperate: u32,
    pub final_cooperate: u32,
    pub final_ratio: f64,
    pub trajectory: Vec<u32>,
    pub second_half_mean_ratio: f64,
    pub second_half_std_ratio: f64,
    pub fused: bool,
    pub fusion_round: Option<u64>,
    pub defect_increases: usize,
    pub counts_conserved: bool,
    pub final_mean_score: f64,
    pub elapsed_ms: u128,
    pub rounds_per_sec: f64,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub fusion_rate: f64,
    pub final_ratio: Stats,
    pub second_half_mean_ratio: Stats,
    pub second_half_std_ratio: Stats,
    /// Only over runs that fused.
    pub fusion_round: Stats,
    pub final_mean_score: Stats,
    pub elapsed_ms: Stats,
    pub rounds_per_sec: Stats,
    pub individual_runs: Vec<BenchResult>,
}

// ─── Hypothesis Validation Summary ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HypothesisValidation {
    pub convergence: bool,
    pub comparison: bool,
    pub stability: bool,
    pub fusion: bool,
    pub comparison_detail: Option<ResonanceComparison>,
}

impl HypothesisValidation {
    pub fn all_pass(&self) -> bool {
        self.convergence && self.comparison && self.stability && self.fusion
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub base_seed: u64,
    pub summary: Summary,
    pub hypothesis_validation: HypothesisValidation,
    pub scenarios: Vec<MonteCarloReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<crate::models::ModelReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

impl Summary {
    pub fn from_reports(reports: &[MonteCarloReport], threshold: f64) -> Self {
        let total = reports.len();
        let passed = reports.iter().filter(|r| r.pass_rate >= threshold).count();
        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate: if total == 0 { 0.0 } else { passed as f64 / total as f64 },
        }
    }
}
