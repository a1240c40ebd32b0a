#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use resonance_engine::analysis::{defect_increases, EvolutionSummary};
    use resonance_engine::payoff::score_round_robin;
    use resonance_engine::*;

    fn config(population_size: usize, initial: Strategy, variant: Variant, seed: u64) -> SimConfig {
        SimConfig {
            population_size,
            initial_strategy: initial,
            variant,
            seed,
            ..SimConfig::default()
        }
    }

    fn random_population(rng: &mut ChaCha8Rng, n: usize) -> Population {
        let strategies = (0..n)
            .map(|_| if rng.gen_bool(0.5) { Strategy::Cooperate } else { Strategy::Defect })
            .collect();
        Population::from_strategies(strategies).unwrap()
    }

    // ========== Invariants ==========

    #[test]
    fn test_counts_sum_to_population_every_round() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for rule in [UpdateRule::transparency(), UpdateRule::Imitation] {
            for n in [1, 2, 7, 30] {
                let pop = random_population(&mut rng, n);
                let history =
                    run_simulation(pop, &PayoffMatrix::reference(), &rule, 40, &mut rng).unwrap();
                assert_eq!(history.len(), 40);
                assert!(history.iter().all(|r| r.total() as usize == n), "n={} rule={:?}", n, rule);
            }
        }
    }

    #[test]
    fn test_scoring_is_mirrored_under_role_swap() {
        let payoffs = PayoffMatrix::reference();
        let forward = score_round_robin(&[Strategy::Cooperate, Strategy::Defect], &payoffs);
        let reverse = score_round_robin(&[Strategy::Defect, Strategy::Cooperate], &payoffs);
        assert_eq!(forward, vec![0.0, 4.0]);
        assert_eq!(reverse, vec![4.0, 0.0]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        for variant in [Variant::TransparencyDriven, Variant::Imitation] {
            let cfg = SimConfig { initial_defectors: 17, ..config(40, Strategy::Cooperate, variant, 99) };
            let mut a = GameSimulation::from_config(&cfg).unwrap();
            let mut b = GameSimulation::from_config(&cfg).unwrap();
            assert_eq!(a.run(60).unwrap(), b.run(60).unwrap());
            assert_eq!(a.population(), b.population());
        }
    }

    #[test]
    fn test_different_seeds_can_diverge() {
        let runs: Vec<Vec<RoundRecord>> = (0..5)
            .map(|seed| {
                let cfg = SimConfig { initial_defectors: 10, ..config(50, Strategy::Cooperate, Variant::Imitation, seed) };
                GameSimulation::from_config(&cfg).unwrap().run(20).unwrap().to_vec()
            })
            .collect();
        assert!(runs.windows(2).any(|w| w[0] != w[1]));
    }

    // ========== Steady States ==========

    #[test]
    fn test_all_cooperate_is_absorbing_under_both_variants() {
        for variant in [Variant::TransparencyDriven, Variant::Imitation] {
            let mut sim = GameSimulation::from_config(&config(25, Strategy::Cooperate, variant, 5)).unwrap();
            let history = sim.run(50).unwrap();
            assert!(history.iter().all(|r| r.cooperate_count == 25 && r.defect_count == 0));
        }
    }

    #[test]
    fn test_fifty_cooperators_stay_for_one_hundred_rounds() {
        let mut sim = GameSimulation::from_config(&SimConfig::default()).unwrap();
        let history = sim.run(100).unwrap();
        assert_eq!(history.len(), 100);
        assert!(history.iter().all(|r| r.cooperate_count == 50));

        let summary = EvolutionSummary::from_history(history);
        assert!(summary.converged());
        assert!(summary.stable());
        assert!(summary.fused);
    }

    #[test]
    fn test_two_agents_score_zero_and_four() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pop = Population::from_strategies(vec![Strategy::Cooperate, Strategy::Defect]).unwrap();
        let outcome = run_round(&pop, &PayoffMatrix::new(3.0, 1.0, 0.0, 4.0), &UpdateRule::Imitation, 0, &mut rng);

        let mut scores = outcome.scores.clone();
        scores.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(scores, vec![0.0, 4.0]);
        assert_eq!(outcome.signal.best_score, 4.0);
    }

    #[test]
    fn test_imitation_all_defect_never_cooperates() {
        let mut sim = GameSimulation::from_config(&config(10, Strategy::Defect, Variant::Imitation, 13)).unwrap();
        let history = sim.run(50).unwrap();
        assert!(history.iter().all(|r| r.cooperate_count == 0 && r.defect_count == 10));
    }

    // ========== Transparency Dynamics ==========

    #[test]
    fn test_transparency_recovers_from_all_defect() {
        // 2 per opponent: the mean is 1.96·k + 49, so conversion runs until k >= 25
        let cfg = SimConfig {
            transparency: TransparencyParams { decline_threshold: 98.0, ..TransparencyParams::default() },
            ..config(50, Strategy::Defect, Variant::TransparencyDriven, 31)
        };
        let mut sim = GameSimulation::from_config(&cfg).unwrap();
        let history = sim.run(100).unwrap();

        assert_eq!(history.first().map(|r| r.cooperate_count < 50), Some(true));
        let last = history.last().unwrap();
        assert!(last.cooperate_count >= 25, "stalled at {}", last.cooperate_count);
        assert_eq!(defect_increases(history), 0);
    }

    #[test]
    fn test_transparency_pair_recovers_with_reference_threshold() {
        // two defectors score 1 each, below the default threshold of 2
        let mut sim = GameSimulation::from_config(&config(2, Strategy::Defect, Variant::TransparencyDriven, 3)).unwrap();
        let history = sim.run(60).unwrap();
        assert!(history.last().unwrap().cooperate_count >= 1);
    }

    #[test]
    fn test_transparency_never_increases_defectors() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..10 {
            let n = rng.gen_range(1..=40);
            let pop = random_population(&mut rng, n);
            let history =
                run_simulation(pop, &PayoffMatrix::reference(), &UpdateRule::transparency(), 50, &mut rng).unwrap();
            assert_eq!(defect_increases(&history), 0);
        }
    }

    #[test]
    fn test_signal_log_tracks_pre_update_counts() {
        let cfg = SimConfig { initial_defectors: 5, ..config(20, Strategy::Cooperate, Variant::Imitation, 8) };
        let mut sim = GameSimulation::from_config(&cfg).unwrap();
        sim.run(10).unwrap();

        let log = sim.transparency_log();
        assert_eq!(log[0].defect_count, 5);
        for (signal, prev) in log[1..].iter().zip(sim.history()) {
            assert_eq!(signal.cooperate_count, prev.cooperate_count);
            assert_eq!(signal.defect_count, prev.defect_count);
        }
    }

    // ========== Configuration ==========

    #[test]
    fn test_toml_config_drives_a_run() {
        let cfg: SimConfig = r#"
            population_size = 12
            initial_defectors = 3
            rounds = 15
            seed = 4
            variant = "imitation"
            "#
        .parse()
        .unwrap();
        let mut sim = GameSimulation::from_config(&cfg).unwrap();
        let history = sim.run(cfg.rounds).unwrap();
        assert_eq!(history.len(), 15);
        assert!(history.iter().all(|r| r.total() == 12));
    }

    #[test]
    fn test_invalid_configs_are_rejected_before_running() {
        let bad = [
            SimConfig { population_size: 0, ..SimConfig::default() },
            SimConfig { rounds: 0, ..SimConfig::default() },
            SimConfig { initial_strategy: Strategy::Neutral, ..SimConfig::default() },
            SimConfig { initial_defectors: 51, ..SimConfig::default() },
            SimConfig {
                transparency: TransparencyParams { conversion_probability: 1.5, ..TransparencyParams::default() },
                ..SimConfig::default()
            },
        ];
        for cfg in &bad {
            assert!(GameSimulation::from_config(cfg).is_err(), "{:?}", cfg);
        }
    }
}
