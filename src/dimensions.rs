// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Intelligence Dimensions
//
// The five-layer dimension catalogue: static descriptive data per layer and a
// per-system health assessment that walks every layer in order.

use serde::Serialize;

// ─── Dimension ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    D1,
    D2,
    D3,
    D4,
    D5,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [Self::D1, Self::D2, Self::D3, Self::D4, Self::D5];

    pub fn name(&self) -> &'static str {
        match self {
            Self::D1 => "Primal Instincts",
            Self::D2 => "Emotional Intelligence",
            Self::D3 => "Rational Intelligence",
            Self::D4 => "Systemic Intelligence",
            Self::D5 => "Wisdom",
        }
    }

    /// Short label, "1D" through "5D".
    pub fn label(&self) -> &'static str {
        match self {
            Self::D1 => "1D",
            Self::D2 => "2D",
            Self::D3 => "3D",
            Self::D4 => "4D",
            Self::D5 => "5D",
        }
    }

    /// Every dimension builds on all lower ones.
    pub fn depends_on(&self) -> &'static [Dimension] {
        use Dimension::*;
        match self {
            D1 => &[],
            D2 => &[D1],
            D3 => &[D1, D2],
            D4 => &[D1, D2, D3],
            D5 => &[D1, D2, D3, D4],
        }
    }

    pub fn level(&self) -> usize {
        *self as usize + 1
    }

    pub fn profile(&self) -> &'static DimensionProfile {
        &PROFILES[*self as usize]
    }
}

// ─── Catalogue ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, PartialEq)]
pub struct DimensionProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub core_factors: &'static [&'static str],
    pub learning_mechanisms: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    /// Guiding question when assessing a system against this layer.
    pub question: &'static str,
    /// What goes wrong when a system neglects this layer.
    pub risk: &'static str,
}

static PROFILES: [DimensionProfile; 5] = [
    DimensionProfile {
        title: "Primordial Instincts",
        description: "Biological survival mechanisms, emotional foundations and tribal \
            instincts beneath all higher cognition. Without safety and belonging the \
            higher layers cannot develop.",
        core_factors: &[
            "Physical safety and security",
            "Nutrition and biological needs",
            "Reproduction and kinship bonds",
            "Tribal belonging and group identity",
            "Fight/flight/freeze responses",
            "Basic emotion regulation",
        ],
        learning_mechanisms: &[
            "Classical conditioning (threat-response)",
            "Social modeling and mirror neurons",
            "Embodied experience and sensation",
            "Rhythm and ritual",
            "Story and narrative",
        ],
        risk_factors: &[
            "Chronic stress and threat response",
            "Social rejection and isolation",
            "Unpredictability and chaos",
            "Abandonment and betrayal",
            "Violation of bodily autonomy",
            "Transgenerational trauma",
        ],
        question: "Does this system make people feel safe, belong, and secure?",
        risk: "Ignoring 1D needs creates chronic stress that cascades to all higher dimensions",
    },
    DimensionProfile {
        title: "Self-Regulation & Emotional Intelligence",
        description: "Understanding one's own emotions, staying authentic and generating \
            intrinsic motivation. Personal agency starts here.",
        core_factors: &[
            "Emotional self-awareness",
            "Impulse control and delayed gratification",
            "Self-compassion and resilience",
            "Intrinsic motivation",
            "Authenticity and integrity",
            "Capacity for self-reflection",
        ],
        learning_mechanisms: &[
            "Meditation and mindfulness",
            "Psychotherapy and self-exploration",
            "Creative expression",
            "Feedback from trusted sources",
            "Somatic/body awareness practices",
            "Values clarification work",
        ],
        risk_factors: &[
            "Perfectionism and shame",
            "Disconnection from emotions",
            "Forced compliance and oppression",
            "Authenticity suppression",
            "Over-reliance on external validation",
            "Burnout from extrinsic motivation",
        ],
        question: "Does this system encourage authenticity and intrinsic motivation?",
        risk: "Coercive systems damage 2D capacity and create learned helplessness",
    },
    DimensionProfile {
        title: "Social Coordination & Institutions",
        description: "Coordinating in groups, handling conflict constructively and keeping \
            institutions coherent. Collective goals are reached at this layer.",
        core_factors: &[
            "Group coordination mechanisms",
            "Conflict resolution processes",
            "Transparent communication",
            "Shared values and culture",
            "Accountability and responsibility",
            "Distributed decision-making",
        ],
        learning_mechanisms: &[
            "Deliberative processes",
            "Peer feedback and evaluation",
            "Collaborative problem-solving",
            "Shared rituals and practices",
            "Rotational leadership",
            "Case studies and historical analysis",
        ],
        risk_factors: &[
            "Hierarchy as dogma",
            "Corruption and hidden agendas",
            "Groupthink and conformity pressure",
            "Scapegoating and blame",
            "Siloed information",
            "Institutional entropy",
        ],
        question: "Is this system transparent, participatory, and genuinely collaborative?",
        risk: "Opaque hierarchical systems breed distrust and dysfunction",
    },
    DimensionProfile {
        title: "Emergent Collaboration & Innovation",
        description: "Transdisciplinary teams producing radical innovation through open \
            collaboration. Breakthroughs come from diverse, trusting networks.",
        core_factors: &[
            "Cross-disciplinary thinking",
            "Psychological safety",
            "Cognitive diversity",
            "Rapid iteration and feedback",
            "Network thinking",
            "Adaptive complexity management",
        ],
        learning_mechanisms: &[
            "Hackathons and innovation sprints",
            "Open-source collaboration",
            "Failure analysis and retrospectives",
            "Diverse team composition",
            "Rapid prototyping",
            "Cross-sector knowledge sharing",
        ],
        risk_factors: &[
            "Silos and specialization dogma",
            "Fear of failure",
            "Hero culture (single saviors)",
            "Intellectual property hoarding",
            "Status hierarchies",
            "Short-term thinking",
        ],
        question: "Does this system unleash transdisciplinary creativity and adaptive learning?",
        risk: "Closed systems stagnate; emergent systems compound learning",
    },
    DimensionProfile {
        title: "Consciousness & Transcendence",
        description: "A speculative layer beyond individual and collective intelligence: \
            systems consciousness, human-nature coevolution and post-hierarchical \
            governance.",
        core_factors: &[
            "Systems consciousness (seeing wholes)",
            "Ecological embeddedness",
            "Long-term intergenerational thinking",
            "Transcendent meaning-making",
            "Deep wisdom traditions",
            "Integral perspectives",
        ],
        learning_mechanisms: &[
            "Contemplative practices",
            "Ecological immersion",
            "Cross-cultural wisdom study",
            "Integral philosophy",
            "Systems modeling",
            "Future thinking and foresight",
        ],
        risk_factors: &[
            "Anthropocentrism",
            "Short-termism",
            "Fragmented knowledge",
            "Spiritual materialism",
            "Apocalyptic thinking",
            "Wisdom-practice disconnect",
        ],
        question: "Does this system support long-term flourishing and co-evolution with nature?",
        risk: "Short-term extractive systems destroy long-term viability",
    },
];

// ─── Health Assessment ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DimensionAssessment {
    pub dimension: Dimension,
    pub label: &'static str,
    pub title: &'static str,
    pub core_factors: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    pub question: &'static str,
    pub risk: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemHealth {
    pub system: String,
    pub dimensions: Vec<DimensionAssessment>,
}

/// Assess `system` against every dimension, lowest first.
pub fn assess_system_health(system: &str) -> SystemHealth {
    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let p = dimension.profile();
            DimensionAssessment {
                dimension,
                label: dimension.label(),
                title: p.title,
                core_factors: p.core_factors,
                risk_factors: p.risk_factors,
                question: p.question,
                risk: p.risk,
            }
        })
        .collect();
    SystemHealth { system: system.to_string(), dimensions }
}
