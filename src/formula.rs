// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Resonance Formulas
//
// Closed-form scores over bounded [0, 1] factors. Every formula is a pure
// function of a validated parameter struct; denominators carry explicit floors.

use serde::{Deserialize, Serialize};

use crate::config::{check_probability, ConfigError};

/// Floor applied to hierarchy defensivity in the effectiveness ratio.
pub const DEFENSIVITY_FLOOR: f64 = 0.1;

/// Gain of one cooperation feedback step.
pub const FEEDBACK_GAIN: f64 = 0.3;

// ---------------------------------------------------------------------------
// System metrics
// ---------------------------------------------------------------------------

/// Snapshot of an organisation-level system, every factor in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SystemMetrics {
    pub authenticity: f64,
    pub participation: f64,
    pub transparency: f64,
    pub hierarchy_defensivity: f64,
}

impl SystemMetrics {
    pub fn new(
        authenticity: f64,
        participation: f64,
        transparency: f64,
        hierarchy_defensivity: f64,
    ) -> Result<Self, ConfigError> {
        let metrics = Self { authenticity, participation, transparency, hierarchy_defensivity };
        metrics.validate()?;
        Ok(metrics)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("authenticity", self.authenticity)?;
        check_probability("participation", self.participation)?;
        check_probability("transparency", self.transparency)?;
        check_probability("hierarchy_defensivity", self.hierarchy_defensivity)
    }

    /// (a·p·t) / max(h, 0.1)
    pub fn effectiveness(&self) -> f64 {
        let numerator = self.authenticity * self.participation * self.transparency;
        numerator / self.hierarchy_defensivity.max(DEFENSIVITY_FLOOR)
    }

    /// Mean openness scaled by the absence of defensivity.
    pub fn resilience(&self) -> f64 {
        let openness = (self.authenticity + self.participation + self.transparency) / 3.0;
        openness * (1.0 - self.hierarchy_defensivity)
    }

    pub fn innovation_potential(&self) -> f64 {
        self.authenticity * self.participation * (1.0 - self.hierarchy_defensivity)
    }
}

// ---------------------------------------------------------------------------
// Resonance index
// ---------------------------------------------------------------------------

/// Inputs of R = T·F·O / (1 + H).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResonanceInputs {
    pub transparency: f64,
    pub feedback: f64,
    pub openness: f64,
    pub hierarchy: f64,
}

impl ResonanceInputs {
    pub fn new(transparency: f64, feedback: f64, openness: f64, hierarchy: f64) -> Result<Self, ConfigError> {
        let inputs = Self { transparency, feedback, openness, hierarchy };
        inputs.validate()?;
        Ok(inputs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("transparency", self.transparency)?;
        check_probability("feedback", self.feedback)?;
        check_probability("openness", self.openness)?;
        check_probability("hierarchy", self.hierarchy)
    }

    pub fn resonance(&self) -> f64 {
        resonance_index(self.transparency, self.feedback, self.openness, self.hierarchy)
    }
}

pub fn resonance_index(transparency: f64, feedback: f64, openness: f64, hierarchy: f64) -> f64 {
    (transparency * feedback * openness) / (1.0 + hierarchy)
}

/// One unclamped feedback step: c + 0.3·R.
pub fn feedback_step(cooperation: f64, resonance: f64) -> f64 {
    cooperation + resonance * FEEDBACK_GAIN
}
