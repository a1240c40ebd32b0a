// Paired Comparison — with vs without resonance on identical seeds
// Same population, same seed, only the update rule differs

use serde::Serialize;
use resonance_engine::*;

// ─── Cooperation Tracker ────────────────────────────────────────────────────

/// Accumulates final cooperate ratios across paired runs.
#[derive(Debug, Default)]
pub struct CooperationTracker {
    pub final_ratios: Vec<f64>,
}

impl CooperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&mut self, history: &[RoundRecord]) {
        self.final_ratios.push(history.last().map(|r| r.cooperate_ratio()).unwrap_or(0.0));
    }

    pub fn stats(&self) -> Stats {
        Stats::from_samples(&self.final_ratios)
    }
}

// ─── Resonance Comparison (Paired Runs) ─────────────────────────────────────

/// Result of a paired comparison.
/// The hypothesis holds when the transparency rule ends with a strictly
/// higher mean cooperate ratio than imitation.
#[derive(Debug, Clone, Serialize)]
pub struct ResonanceComparison {
    pub population_size: usize,
    pub initial_defectors: usize,
    pub rounds: u64,
    pub pairs: usize,
    pub with_resonance: Stats,
    pub without_resonance: Stats,
    pub difference: f64,
    /// Pairs in which the transparency run strictly beat imitation.
    pub pair_wins: usize,
    pub passes: bool,
}

/// Run `pairs` paired comparisons with seeds `base_seed..base_seed + pairs`,
/// wrapping at `u64::MAX`.
pub fn run_resonance_comparison(
    population_size: usize,
    initial_defectors: usize,
    rounds: u64,
    pairs: usize,
    base_seed: u64,
) -> Result<ResonanceComparison, ConfigError> {
    let mut with = CooperationTracker::new();
    let mut without = CooperationTracker::new();

    for i in 0..pairs {
        let base = SimConfig {
            population_size,
            initial_defectors,
            rounds,
            seed: base_seed.wrapping_add(i as u64),
            ..SimConfig::default()
        };
        with.record_run(&run_variant(&base, Variant::TransparencyDriven)?);
        without.record_run(&run_variant(&base, Variant::Imitation)?);
    }

    let pair_wins = with
        .final_ratios
        .iter()
        .zip(&without.final_ratios)
        .filter(|(w, wo)| w > wo)
        .count();
    let with_resonance = with.stats();
    let without_resonance = without.stats();
    let difference = with_resonance.mean - without_resonance.mean;

    Ok(ResonanceComparison {
        population_size,
        initial_defectors,
        rounds,
        pairs,
        with_resonance,
        without_resonance,
        difference,
        pair_wins,
        passes: pairs > 0 && difference > 0.0,
    })
}

fn run_variant(base: &SimConfig, variant: Variant) -> Result<Vec<RoundRecord>, ConfigError> {
    let config = SimConfig { variant, ..base.clone() };
    let mut sim = GameSimulation::from_config(&config)?;
    Ok(sim.run(config.rounds)?.to_vec())
}
