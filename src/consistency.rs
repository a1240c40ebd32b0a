// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Framework Consistency Checks
//
// Structural checks over the five intelligence dimensions and numeric checks
// over the resonance formulas. Results are plain data and export to JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dimensions::Dimension;
use crate::formula::{feedback_step, resonance_index};

// ─── Results ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub severity: Severity,
    pub details: BTreeMap<String, String>,
}

impl CheckResult {
    fn new(name: &'static str, severity: Severity) -> Self {
        Self { name, passed: true, severity, details: BTreeMap::new() }
    }

    fn fail(&mut self, key: impl Into<String>, detail: impl Into<String>) {
        self.passed = false;
        self.details.insert(key.into(), detail.into());
    }

    fn note(&mut self, key: impl Into<String>, detail: impl Into<String>) {
        self.details.insert(key.into(), detail.into());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub results: Vec<CheckResult>,
    pub passed: usize,
    pub total: usize,
}

impl ConsistencyReport {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

// ─── Checks ──────────────────────────────────────────────────────────────────

pub fn check_dimensional_independence() -> CheckResult {
    check_dependencies(|d| d.depends_on().to_vec())
}

fn check_dependencies(deps: impl Fn(Dimension) -> Vec<Dimension>) -> CheckResult {
    let mut result = CheckResult::new("Dimensional Independence", Severity::Critical);
    for dim in Dimension::ALL {
        for dep in deps(dim) {
            if deps(dep).contains(&dim) {
                result.fail(
                    format!("circular_{:?}_{:?}", dim, dep),
                    format!("circular dependency: {:?} <-> {:?}", dim, dep),
                );
            }
            if dep >= dim {
                result.fail(
                    format!("hierarchy_{:?}_{:?}", dim, dep),
                    format!("{:?} depends on same or higher {:?}", dim, dep),
                );
            }
        }
    }
    if result.passed {
        result.note("status", "all dimensions maintain proper hierarchy");
    }
    result
}

pub fn check_resonance_formula() -> CheckResult {
    let mut result = CheckResult::new("Resonance Formula Logic", Severity::Critical);
    let (t, f, o, h) = (0.5, 0.7, 0.6, 0.2);

    if [t, f, o, h].iter().any(|v| !(0.0..=1.0).contains(v)) {
        result.fail("invalid_range", "parameter outside [0, 1]");
    }
    let baseline = resonance_index(t, f, o, h);
    if resonance_index(0.8, f, o, h) <= baseline {
        result.fail("monotonicity_t", "formula does not increase with T");
    }
    if resonance_index(t, f, o, 0.5) >= baseline {
        result.fail("monotonicity_h", "formula does not decrease with H");
    }
    if result.passed {
        result.note("formula", "R = T·F·O / (1 + H) is sound");
        result.note("monotonicity", "increasing in T, decreasing in H");
    }
    result
}

pub fn check_feedback_loop() -> CheckResult {
    let mut result = CheckResult::new("Feedback Loop Logic", Severity::Critical);

    let cooperation = 0.5;
    let next = feedback_step(cooperation, resonance_index(0.6, 0.7, 0.8, 0.1));
    if next <= cooperation {
        result.fail("positive_feedback", "loop does not amplify cooperation");
    }

    // near-saturated cooperation must not be pushed past 1
    let extreme = 0.99;
    let extreme_next = feedback_step(extreme, resonance_index(0.95, 0.95, 0.95, 0.05));
    if extreme_next > 1.0 {
        result.fail("boundary", format!("cooperation diverges to {:.3}", extreme_next));
    }
    if result.passed {
        result.note("feedback", "self-reinforcing and bounded");
    }
    result
}

/// Warning-level only: findings are recorded without failing the check.
pub fn check_integration() -> CheckResult {
    let mut result = CheckResult::new("5D Integration", Severity::Warning);
    let (d1, d2, d3, d4) = (0.6, 0.7, 0.8, 0.75);
    let d5 = 0.8;

    let average = (d1 + d2 + d3 + d4) / 4.0;
    if d5 <= average {
        result.note("redundancy", format!("D5 might be redundant: {} vs {:.4}", d5, average));
    }
    if d5 < d1 * d2 * d3 * d4 * 0.5 {
        result.note("transformation", "D5 lacks transformation effect");
    }
    if result.details.is_empty() {
        result.note("integration", "D5 integrates and transforms the lower dimensions");
    }
    result
}

/// Principles the framework declares about itself.
pub const SYSTEM_PRINCIPLES: [(&str, bool); 6] = [
    ("open", true),
    ("transparent", true),
    ("supports_error_culture", true),
    ("promotes_cooperation", true),
    ("avoids_hierarchy", true),
    ("includes_feedback", true),
];

pub fn check_system_principles() -> CheckResult {
    let mut result = CheckResult::new("System Consistency", Severity::Critical);
    for (principle, holds) in SYSTEM_PRINCIPLES {
        if !holds {
            result.fail(principle, "system principle violated");
        }
    }
    if result.passed {
        result.note("status", "all core principles maintained");
    }
    result
}

pub fn run_all_checks() -> ConsistencyReport {
    let results = vec![
        check_dimensional_independence(),
        check_resonance_formula(),
        check_feedback_loop(),
        check_integration(),
        check_system_principles(),
    ];
    let passed = results.iter().filter(|r| r.passed).count();
    for r in results.iter().filter(|r| !r.passed) {
        tracing::warn!(check = r.name, severity = ?r.severity, "consistency check failed");
    }
    ConsistencyReport { total: results.len(), passed, results }
}
