// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite ("The Engine")

pub mod types;
pub mod config;
pub mod payoff;
pub mod population;
pub mod update;
pub mod simulation;
pub mod analysis;

// Peripheral toy models built on the resonance formulas
pub mod formula;
pub mod feedback;
pub mod cooperation;
pub mod contact;
pub mod dimensions;
pub mod consistency;

pub use types::*;
pub use config::{ConfigError, SimConfig};
pub use payoff::{score_round_robin, PayoffMatrix};
pub use population::{initialize_population, Population};
pub use update::{TransparencyParams, UpdateRule};
pub use simulation::{run_round, run_simulation, GameSimulation, RoundOutcome};
pub use analysis::{EvolutionSummary, Stats};
