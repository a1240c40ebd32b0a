// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Strategy ────────────────────────────────────────────────────────────────

/// Move played by an agent in the symmetric two-player game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Cooperate = 0,
    Defect = 1,
    /// Declared for labelling only; no update rule ever produces it.
    Neutral = 2,
}

impl Default for Strategy {
    fn default() -> Self { Strategy::Cooperate }
}

impl Strategy {
    pub fn is_cooperate(&self) -> bool {
        matches!(self, Self::Cooperate)
    }

    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect)
    }

    /// Colour label used in reports ("GREEN" / "RED" / "GRAY").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cooperate => "GREEN",
            Self::Defect => "RED",
            Self::Neutral => "GRAY",
        }
    }
}

// ─── Round Record ────────────────────────────────────────────────────────────

/// Post-update strategy counts for one round. Appended once per round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub round_index: u64,
    pub cooperate_count: u32,
    pub defect_count: u32,
}

impl RoundRecord {
    pub fn total(&self) -> u32 {
        self.cooperate_count + self.defect_count
    }

    /// Share of cooperators, 0.0 for an empty record.
    pub fn cooperate_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 0.0; }
        self.cooperate_count as f64 / total as f64
    }
}

// ─── Transparency Signal ─────────────────────────────────────────────────────

/// What the population "sees" after scoring and before the update step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransparencySignal {
    pub round_index: u64,
    pub best_score: f64,
    pub mean_score: f64,
    pub cooperate_count: u32,
    pub defect_count: u32,
}

// ─── Update Variant Tag ──────────────────────────────────────────────────────

/// Which update rule drives a run. Used as a plain tag in configs and reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// "With resonance": Defectors convert when the mean score collapses.
    TransparencyDriven,
    /// "Without resonance": imitate a random peer that scored higher.
    Imitation,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransparencyDriven => "transparency",
            Self::Imitation => "imitation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooperate_ratio() {
        let r = RoundRecord { round_index: 0, cooperate_count: 3, defect_count: 1 };
        assert_eq!(r.total(), 4);
        assert!((r.cooperate_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_record_ratio_is_zero() {
        let r = RoundRecord { round_index: 0, cooperate_count: 0, defect_count: 0 };
        assert_eq!(r.cooperate_ratio(), 0.0);
    }

    #[test]
    fn test_variant_serde_names() {
        let json = serde_json::to_string(&Variant::TransparencyDriven).unwrap();
        assert_eq!(json, "\"transparency_driven\"");
        let v: Variant = serde_json::from_str("\"imitation\"").unwrap();
        assert_eq!(v, Variant::Imitation);
    }
}
