// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Human/AI Cooperation Model
//
// One human and one AI system trade recommendations. Each interaction is a
// single Bernoulli trial on the human's acceptance probability; trust and AI
// transparency drift by small fixed deltas depending on the outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{check_probability, ConfigError};

const TRUST_GAIN: f64 = 0.05;
const TRUST_LOSS: f64 = 0.03;
/// Explanations longer than this are understood.
const UNDERSTANDING_LENGTH: u32 = 50;
const OPACITY_FLOOR: f64 = 0.1;

pub const DEFAULT_INTERACTIONS: usize = 15;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HumanAgent {
    pub name: String,
    pub expertise: f64,
    pub autonomy_need: f64,
    pub trust: f64,
    pub transparency_requirement: f64,
    pub alignment: f64,
}

impl HumanAgent {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("expertise", self.expertise)?;
        check_probability("autonomy_need", self.autonomy_need)?;
        check_probability("trust", self.trust)?;
        check_probability("transparency_requirement", self.transparency_requirement)?;
        check_probability("alignment", self.alignment)
    }

    /// Probability of accepting a recommendation with the given explanation.
    pub fn acceptance_probability(&self, explanation_length: u32) -> f64 {
        let understanding = if explanation_length > UNDERSTANDING_LENGTH { 1.0 } else { 0.3 };
        let transparency_satisfaction = understanding * self.transparency_requirement;
        // the human always keeps half of their autonomy need
        let autonomy_satisfaction = (1.0 - self.autonomy_need) + self.autonomy_need * 0.5;
        let trust_impact = self.trust * 0.7;
        (transparency_satisfaction + autonomy_satisfaction + trust_impact + self.alignment) / 4.0
    }

    fn record_outcome(&mut self, accepted: bool) {
        self.trust = if accepted {
            (self.trust + TRUST_GAIN).min(1.0)
        } else {
            (self.trust - TRUST_LOSS).max(0.0)
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiSystem {
    pub name: String,
    pub capability: f64,
    pub transparency: f64,
    pub learning_rate: f64,
    pub alignment_focus: f64,
}

/// What the AI hands to the human.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Recommendation {
    pub confidence: f64,
    pub explanation_length: u32,
}

impl AiSystem {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("capability", self.capability)?;
        check_probability("transparency", self.transparency)?;
        check_probability("learning_rate", self.learning_rate)?;
        check_probability("alignment_focus", self.alignment_focus)
    }

    pub fn recommend<R: Rng + ?Sized>(&self, rng: &mut R) -> Recommendation {
        let confidence = self.capability * rng.gen_range(0.7..=1.0);
        let explanation_length = (100.0 * self.transparency) as u32 + rng.gen_range(30..=70);
        Recommendation { confidence, explanation_length }
    }

    /// Rejections push the AI towards explaining more and aligning better.
    fn adapt(&mut self, accepted: bool) {
        if !accepted {
            self.transparency = (self.transparency + self.learning_rate * 0.1).min(1.0);
            self.alignment_focus = (self.alignment_focus + self.learning_rate * 0.05).min(1.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Interaction {
    pub iteration: usize,
    pub recommendation: Recommendation,
    pub accepted: bool,
    pub acceptance_probability: f64,
    pub human_trust: f64,
    pub ai_transparency: f64,
    pub resonance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CooperationModel {
    pub human: HumanAgent,
    pub ai: AiSystem,
    pub history: Vec<Interaction>,
}

impl CooperationModel {
    pub fn new(human: HumanAgent, ai: AiSystem) -> Result<Self, ConfigError> {
        human.validate()?;
        ai.validate()?;
        Ok(Self { human, ai, history: Vec::new() })
    }

    /// autonomy · transparency · mean alignment / max(0.1, opacity), capped at 1.
    pub fn resonance(&self) -> f64 {
        let alignment = (self.human.alignment + self.ai.alignment_focus) / 2.0;
        let opacity = (1.0 - (self.human.trust + self.ai.transparency) / 2.0).max(OPACITY_FLOOR);
        let resonance = self.human.autonomy_need * self.ai.transparency * alignment / opacity;
        resonance.min(1.0)
    }

    pub fn interact<R: Rng + ?Sized>(&mut self, iteration: usize, rng: &mut R) -> Interaction {
        let recommendation = self.ai.recommend(rng);
        let acceptance_probability = self.human.acceptance_probability(recommendation.explanation_length);
        let accepted = rng.gen::<f64>() < acceptance_probability;

        self.human.record_outcome(accepted);
        self.ai.adapt(accepted);

        let interaction = Interaction {
            iteration,
            recommendation,
            accepted,
            acceptance_probability,
            human_trust: self.human.trust,
            ai_transparency: self.ai.transparency,
            resonance: self.resonance(),
        };
        self.history.push(interaction);
        interaction
    }

    pub fn run<R: Rng + ?Sized>(&mut self, iterations: usize, rng: &mut R) -> &[Interaction] {
        let start = self.history.len();
        for i in 0..iterations {
            self.interact(start + i + 1, rng);
        }
        &self.history
    }

    pub fn summary(&self) -> CooperationSummary {
        let n = self.history.len();
        let (acceptance_rate, avg_resonance) = if n == 0 {
            (0.0, 0.0)
        } else {
            (
                self.history.iter().filter(|h| h.accepted).count() as f64 / n as f64,
                self.history.iter().map(|h| h.resonance).sum::<f64>() / n as f64,
            )
        };
        CooperationSummary {
            interactions: n,
            acceptance_rate,
            avg_resonance,
            final_trust: self.human.trust,
            final_transparency: self.ai.transparency,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CooperationSummary {
    pub interactions: usize,
    pub acceptance_rate: f64,
    pub avg_resonance: f64,
    pub final_trust: f64,
    pub final_transparency: f64,
}

impl CooperationSummary {
    pub fn is_good(&self) -> bool {
        self.avg_resonance > 0.6
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CooperationScenario {
    TransparentAligned,
    OpaqueMisaligned,
    AdaptiveLearning,
}

impl CooperationScenario {
    pub const ALL: [CooperationScenario; 3] = [
        Self::TransparentAligned,
        Self::OpaqueMisaligned,
        Self::AdaptiveLearning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TransparentAligned => "Transparent & Aligned AI",
            Self::OpaqueMisaligned => "Opaque & Misaligned AI",
            Self::AdaptiveLearning => "Adaptive Learning AI",
        }
    }

    pub fn agents(&self) -> (HumanAgent, AiSystem) {
        match self {
            Self::TransparentAligned => (
                HumanAgent {
                    name: "Professional Expert".into(),
                    expertise: 0.8,
                    autonomy_need: 0.7,
                    trust: 0.3,
                    transparency_requirement: 0.9,
                    alignment: 0.85,
                },
                AiSystem {
                    name: "Transparent AI Assistant".into(),
                    capability: 0.8,
                    transparency: 0.9,
                    learning_rate: 0.7,
                    alignment_focus: 0.85,
                },
            ),
            Self::OpaqueMisaligned => (
                HumanAgent {
                    name: "Cautious User".into(),
                    expertise: 0.5,
                    autonomy_need: 0.8,
                    trust: 0.2,
                    transparency_requirement: 0.95,
                    alignment: 0.4,
                },
                AiSystem {
                    name: "Optimization-Focused AI".into(),
                    capability: 0.9,
                    transparency: 0.3,
                    learning_rate: 0.2,
                    alignment_focus: 0.3,
                },
            ),
            Self::AdaptiveLearning => (
                HumanAgent {
                    name: "Collaborative Partner".into(),
                    expertise: 0.6,
                    autonomy_need: 0.6,
                    trust: 0.4,
                    transparency_requirement: 0.8,
                    alignment: 0.75,
                },
                AiSystem {
                    name: "Adaptive Learning AI".into(),
                    capability: 0.7,
                    transparency: 0.5,
                    learning_rate: 0.9,
                    alignment_focus: 0.7,
                },
            ),
        }
    }

    pub fn model(&self) -> CooperationModel {
        let (human, ai) = self.agents();
        CooperationModel { human, ai, history: Vec::new() }
    }
}
