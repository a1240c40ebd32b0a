// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Resonance Simulation Suite - Round Executor & Simulation Driver

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{ConfigError, SimConfig};
use crate::payoff::{best_score, mean_score, score_round_robin, PayoffMatrix};
use crate::population::Population;
use crate::types::{RoundRecord, TransparencySignal};
use crate::update::UpdateRule;

/// Upper bound on the history buffer reserved up front; longer runs grow it.
const MAX_PREALLOCATED_ROUNDS: u64 = 4096;

// ─── Round Executor ──────────────────────────────────────────────────────────

/// Everything one round produces.
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    pub population: Population,
    pub record: RoundRecord,
    pub signal: TransparencySignal,
    pub scores: Vec<f64>,
}

/// Score all pairs of `population`, then apply `rule` to get the next generation.
pub fn run_round<R: Rng + ?Sized>(
    population: &Population,
    payoffs: &PayoffMatrix,
    rule: &UpdateRule,
    round_index: u64,
    rng: &mut R,
) -> RoundOutcome {
    let scores = score_round_robin(population.strategies(), payoffs);

    let signal = TransparencySignal {
        round_index,
        best_score: best_score(&scores),
        mean_score: mean_score(&scores),
        cooperate_count: population.cooperate_count(),
        defect_count: population.defect_count(),
    };

    let next = population.next_generation(rule.apply(population.strategies(), &scores, rng));
    let record = next.record(round_index);

    tracing::debug!(
        round = round_index,
        mean = signal.mean_score,
        cooperate = record.cooperate_count,
        defect = record.defect_count,
        "round complete"
    );

    RoundOutcome { population: next, record, signal, scores }
}

/// Run `rounds` rounds in strict sequence and return the history.
pub fn run_simulation<R: Rng + ?Sized>(
    population: Population,
    payoffs: &PayoffMatrix,
    rule: &UpdateRule,
    rounds: u64,
    rng: &mut R,
) -> Result<Vec<RoundRecord>, ConfigError> {
    if rounds == 0 {
        return Err(ConfigError::InvalidRounds);
    }
    population.validate()?;
    payoffs.validate()?;
    rule.validate()?;

    let mut current = population;
    let mut history = history_buffer(rounds);
    for round_index in 0..rounds {
        let outcome = run_round(&current, payoffs, rule, round_index, rng);
        history.push(outcome.record);
        current = outcome.population;
    }
    Ok(history)
}

fn history_buffer(rounds: u64) -> Vec<RoundRecord> {
    Vec::with_capacity(rounds.min(MAX_PREALLOCATED_ROUNDS) as usize)
}

// ─── Simulation Driver ───────────────────────────────────────────────────────

/// Owns the population, the RNG and the append-only history for one run.
pub struct GameSimulation {
    population: Population,
    payoffs: PayoffMatrix,
    rule: UpdateRule,
    rng: ChaCha8Rng,
    next_round: u64,
    history: Vec<RoundRecord>,
    transparency_log: Vec<TransparencySignal>,
}

impl GameSimulation {
    /// Validates everything before any round can execute.
    pub fn new(
        population: Population,
        payoffs: PayoffMatrix,
        rule: UpdateRule,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        population.validate()?;
        payoffs.validate()?;
        rule.validate()?;
        Ok(Self {
            population,
            payoffs,
            rule,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_round: 0,
            history: Vec::new(),
            transparency_log: Vec::new(),
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let population = Population::with_defectors(
            config.population_size,
            config.initial_strategy,
            config.initial_defectors,
        )?;
        Self::new(population, config.payoffs, config.update_rule(), config.seed)
    }

    /// Execute exactly one round and return its record.
    pub fn step(&mut self) -> RoundRecord {
        let outcome = run_round(
            &self.population,
            &self.payoffs,
            &self.rule,
            self.next_round,
            &mut self.rng,
        );
        self.population = outcome.population;
        self.history.push(outcome.record);
        self.transparency_log.push(outcome.signal);
        self.next_round += 1;
        outcome.record
    }

    /// Run `rounds` more rounds eagerly. Returns the full history so far.
    pub fn run(&mut self, rounds: u64) -> Result<&[RoundRecord], ConfigError> {
        if rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }
        for _ in 0..rounds {
            self.step();
        }
        tracing::info!(
            variant = self.rule.variant().name(),
            rounds = self.next_round,
            cooperate = self.population.cooperate_count(),
            "simulation finished"
        );
        Ok(&self.history)
    }

    /// Lazy view: each `next()` executes one more round.
    pub fn rounds(&mut self, rounds: u64) -> Rounds<'_> {
        Rounds { sim: self, remaining: rounds }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn payoffs(&self) -> &PayoffMatrix {
        &self.payoffs
    }

    pub fn rule(&self) -> &UpdateRule {
        &self.rule
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn transparency_log(&self) -> &[TransparencySignal] {
        &self.transparency_log
    }

    pub fn rounds_played(&self) -> u64 {
        self.next_round
    }
}

/// Iterator returned by [`GameSimulation::rounds`].
pub struct Rounds<'a> {
    sim: &'a mut GameSimulation,
    remaining: u64,
}

impl Iterator for Rounds<'_> {
    type Item = RoundRecord;

    fn next(&mut self) -> Option<RoundRecord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.sim.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::initialize_population;
    use crate::types::Strategy;

    #[test]
    fn test_signal_reflects_pre_update_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pop = Population::from_strategies(vec![Strategy::Cooperate, Strategy::Defect]).unwrap();
        let out = run_round(&pop, &PayoffMatrix::reference(), &UpdateRule::transparency(), 0, &mut rng);

        assert_eq!(out.scores, vec![0.0, 4.0]);
        assert_eq!(out.signal.best_score, 4.0);
        assert_eq!(out.signal.mean_score, 2.0);
        assert_eq!(out.signal.cooperate_count, 1);
        assert_eq!(out.signal.defect_count, 1);
        // mean == threshold, so nobody converts
        assert_eq!(out.record.defect_count, 1);
    }

    #[test]
    fn test_single_agent_triggers_conversion_pressure() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pop = initialize_population(1, Strategy::Defect).unwrap();
        let rule = UpdateRule::TransparencyDriven(crate::update::TransparencyParams {
            decline_threshold: 2.0,
            conversion_probability: 1.0,
        });
        let out = run_round(&pop, &PayoffMatrix::reference(), &rule, 0, &mut rng);
        assert_eq!(out.signal.mean_score, 0.0);
        assert_eq!(out.record.cooperate_count, 1);
    }

    #[test]
    fn test_driver_round_indices_are_sequential() {
        let pop = initialize_population(6, Strategy::Cooperate).unwrap();
        let mut sim = GameSimulation::new(pop, PayoffMatrix::reference(), UpdateRule::Imitation, 4).unwrap();
        let history = sim.run(5).unwrap();
        let indices: Vec<u64> = history.iter().map(|r| r.round_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(sim.transparency_log().len(), 5);
        assert_eq!(sim.rounds_played(), 5);
    }

    #[test]
    fn test_lazy_rounds_match_eager_run() {
        let config = SimConfig { initial_defectors: 20, seed: 77, ..SimConfig::default() };

        let mut eager = GameSimulation::from_config(&config).unwrap();
        let eager_history = eager.run(30).unwrap().to_vec();

        let mut lazy = GameSimulation::from_config(&config).unwrap();
        let lazy_history: Vec<RoundRecord> = lazy.rounds(30).collect();

        assert_eq!(eager_history, lazy_history);
    }

    #[test]
    fn test_run_rejects_zero_rounds() {
        let mut sim = GameSimulation::from_config(&SimConfig::default()).unwrap();
        assert!(matches!(sim.run(0), Err(ConfigError::InvalidRounds)));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pop = initialize_population(3, Strategy::Cooperate).unwrap();
        let result = run_simulation(pop, &PayoffMatrix::reference(), &UpdateRule::Imitation, 0, &mut rng);
        assert!(matches!(result, Err(ConfigError::InvalidRounds)));
    }

    #[test]
    fn test_deserialized_population_is_checked() {
        let empty = serde_json::from_str::<Population>("[]");
        assert!(empty.is_err());

        let with_neutral = serde_json::from_str::<Population>(r#"["cooperate","neutral","defect"]"#);
        assert!(with_neutral.is_err());

        // a valid list runs and keeps counts summing to N
        let pop: Population = serde_json::from_str(r#"["cooperate","defect","defect"]"#).unwrap();
        let mut sim = GameSimulation::new(pop, PayoffMatrix::reference(), UpdateRule::Imitation, 1).unwrap();
        assert!(sim.run(3).unwrap().iter().all(|r| r.total() == 3));
    }

    #[test]
    fn test_history_buffer_is_capped() {
        assert!(history_buffer(3).capacity() >= 3);
        let huge = history_buffer(u64::MAX);
        assert!(huge.capacity() >= MAX_PREALLOCATED_ROUNDS as usize);
        assert!(huge.capacity() < 2 * MAX_PREALLOCATED_ROUNDS as usize);
    }

    #[test]
    fn test_new_rejects_invalid_payoffs() {
        let pop = initialize_population(3, Strategy::Cooperate).unwrap();
        let payoffs = PayoffMatrix::new(3.0, f64::NAN, 0.0, 4.0);
        assert!(GameSimulation::new(pop, payoffs, UpdateRule::Imitation, 0).is_err());
    }
}
