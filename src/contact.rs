// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Unknown-Intelligence Contact Model
//
// A random foreign signal is analysed twice: once with context intelligence
// (systemic pattern recognition) and once without it (literal matching only).

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Floor added to denominators of the context-free formulas.
const DENOMINATOR_FLOOR: f64 = 0.1;

pub const DEFAULT_CONTACTS: usize = 5;

// ─── Signal ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CommunicationMode {
    Resonant,
    Quantum,
    NonLinear,
    Crystalline,
    WaveBased,
}

impl CommunicationMode {
    pub const ALL: [CommunicationMode; 5] = [
        Self::Resonant,
        Self::Quantum,
        Self::NonLinear,
        Self::Crystalline,
        Self::WaveBased,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Resonant => "resonant",
            Self::Quantum => "quantum",
            Self::NonLinear => "non-linear",
            Self::Crystalline => "crystalline",
            Self::WaveBased => "wave-based",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlienSignal {
    /// Component outside the five known dimensions, in [0, 2].
    pub x_dimension: f64,
    pub mode: CommunicationMode,
    /// Negative is hostile, positive cooperative. Range [-0.8, 1].
    pub willingness: f64,
    pub density: f64,
    /// Chaotic share of the signal.
    pub entropy: f64,
}

impl AlienSignal {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x_dimension = rng.gen_range(0.0..=2.0);
        let mode = CommunicationMode::ALL[rng.gen_range(0..CommunicationMode::ALL.len())];
        let willingness = rng.gen_range(-0.8..=1.0);
        let density = rng.gen_range(0.1..=1.0);
        let entropy = rng.gen_range(0.0..=1.0);
        Self { x_dimension, mode, willingness, density, entropy }
    }

    pub fn pattern_complexity(&self) -> f64 {
        self.density * self.x_dimension / (self.entropy + DENOMINATOR_FLOOR)
    }
}

// ─── Analyzers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// Full transparency, feedback and openness; no hierarchy.
    Systemic,
    /// Degraded stance that only pattern-matches literally.
    Literal,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ContactAnalysis {
    pub mode: ContextMode,
    pub can_understand: bool,
    /// Adaptation factor (systemic) or raw resonance (literal).
    pub adaptation: f64,
    pub degradation: f64,
    pub cooperation_potential: f64,
    pub cooperates: bool,
}

/// T·F·O / (H + 0.1), the stance-only part of both analyzers.
fn stance_resonance(transparency: f64, feedback: f64, openness: f64, hierarchy: f64) -> f64 {
    transparency * feedback * openness / (hierarchy + DENOMINATOR_FLOOR)
}

impl ContextMode {
    pub fn analyze(&self, signal: &AlienSignal) -> ContactAnalysis {
        match self {
            ContextMode::Systemic => {
                let complexity = signal.pattern_complexity();
                let adaptation = stance_resonance(1.0, 1.0, 1.0, 0.0) * complexity;
                let can_understand = complexity > 0.3;
                ContactAnalysis {
                    mode: *self,
                    can_understand,
                    adaptation,
                    degradation: 0.0,
                    cooperation_potential: signal.willingness.max(0.0) * adaptation,
                    cooperates: signal.willingness > 0.3 && can_understand,
                }
            }
            ContextMode::Literal => {
                let resonance = stance_resonance(0.7, 0.5, 0.3, 0.6);
                let degradation = 1.0 - resonance;
                ContactAnalysis {
                    mode: *self,
                    can_understand: signal.x_dimension > 0.5,
                    adaptation: resonance,
                    degradation,
                    cooperation_potential: signal.willingness * resonance * 0.3,
                    cooperates: signal.willingness > 0.7 && degradation < 0.5,
                }
            }
        }
    }
}

// ─── Contact run ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub signal: AlienSignal,
    pub systemic: ContactAnalysis,
    pub literal: ContactAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReport {
    pub contacts: Vec<Contact>,
    pub systemic_cooperations: usize,
    pub literal_cooperations: usize,
    pub systemic_rate: f64,
    pub literal_rate: f64,
    pub mean_adaptation: f64,
    pub mean_degradation: f64,
}

impl ContactReport {
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let n = contacts.len();
        let systemic_cooperations = contacts.iter().filter(|c| c.systemic.cooperates).count();
        let literal_cooperations = contacts.iter().filter(|c| c.literal.cooperates).count();
        let rate = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };
        let mean_adaptation = mean_of(&contacts, |c| c.systemic.adaptation);
        let mean_degradation = mean_of(&contacts, |c| c.literal.degradation);

        Self {
            systemic_rate: rate(systemic_cooperations),
            literal_rate: rate(literal_cooperations),
            systemic_cooperations,
            literal_cooperations,
            mean_adaptation,
            mean_degradation,
            contacts,
        }
    }

    /// Context intelligence never does worse than literal matching.
    pub fn systemic_dominates(&self) -> bool {
        self.systemic_cooperations >= self.literal_cooperations
    }
}

fn mean_of(contacts: &[Contact], f: impl Fn(&Contact) -> f64) -> f64 {
    if contacts.is_empty() { return 0.0; }
    contacts.iter().map(f).sum::<f64>() / contacts.len() as f64
}

/// Sample `count` signals and run both analyzers on each.
pub fn run_contact<R: Rng + ?Sized>(rng: &mut R, count: usize) -> ContactReport {
    let contacts = (0..count)
        .map(|_| {
            let signal = AlienSignal::random(rng);
            Contact {
                signal,
                systemic: ContextMode::Systemic.analyze(&signal),
                literal: ContextMode::Literal.analyze(&signal),
            }
        })
        .collect();
    ContactReport::from_contacts(contacts)
}
