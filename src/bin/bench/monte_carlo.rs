// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI

use resonance_engine::analysis::{defect_increases, EvolutionSummary};
use resonance_engine::*;

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> Result<BenchResult, ConfigError> {
    let start = Instant::now();
    let config = SimConfig { seed, ..scenario.config.clone() };
    let mut sim = GameSimulation::from_config(&config)?;
    sim.run(config.rounds)?;

    let history = sim.history();
    let population_size = config.population_size;
    let counts_conserved = history.iter().all(|r| r.total() as usize == population_size);

    if let Some(dir) = time_series_dir {
        let threshold = sim.rule().params().map(|p| p.decline_threshold);
        let mut ts = TimeSeriesRecorder::new(threshold);
        for (record, signal) in history.iter().zip(sim.transparency_log()) {
            ts.record(record, signal);
        }
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write time series");
        }
    }

    let elapsed = start.elapsed();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let summary = EvolutionSummary::from_history(history);
    let increases = defect_increases(history);
    let pass = scenario.criteria.evaluate(&summary, increases, counts_conserved);

    Ok(BenchResult {
        scenario: scenario.label.clone(),
        name: scenario.name.clone(),
        category: scenario.category.to_string(),
        seed,
        pass,
        rule: *sim.rule(),
        population_size,
        rounds: config.rounds,
        initial_cooperate: sim.transparency_log().first().map(|s| s.cooperate_count).unwrap_or(0),
        final_cooperate: summary.final_cooperate,
        final_ratio: summary.final_ratio,
        trajectory: summary.trajectory,
        second_half_mean_ratio: summary.second_half_mean_ratio,
        second_half_std_ratio: summary.second_half_std_ratio,
        fused: summary.fused,
        fusion_round: summary.fusion_round,
        defect_increases: increases,
        counts_conserved,
        final_mean_score: sim.transparency_log().last().map(|s| s.mean_score).unwrap_or(0.0),
        elapsed_ms: elapsed.as_millis(),
        rounds_per_sec: config.rounds as f64 / elapsed_secs,
    })
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> Result<MonteCarloReport, ConfigError> {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed.wrapping_add(i as u64);
        results.push(run_single(scenario, seed, ts_dir.as_deref())?);
    }

    Ok(aggregate(scenario, results))
}

fn stats_of(results: &[BenchResult], f: impl Fn(&BenchResult) -> f64) -> Stats {
    Stats::from_samples(&results.iter().map(f).collect::<Vec<_>>())
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let fused = results.iter().filter(|r| r.fused).count();
    let rate = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };

    let fusion_rounds: Vec<f64> = results
        .iter()
        .filter(|r| r.fused)
        .filter_map(|r| r.fusion_round)
        .map(|round| round as f64)
        .collect();

    MonteCarloReport {
        scenario_name: scenario.name.clone(),
        label: scenario.label.clone(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate: rate(passed),
        fusion_rate: rate(fused),
        final_ratio: stats_of(&results, |r| r.final_ratio),
        second_half_mean_ratio: stats_of(&results, |r| r.second_half_mean_ratio),
        second_half_std_ratio: stats_of(&results, |r| r.second_half_std_ratio),
        fusion_round: Stats::from_samples(&fusion_rounds),
        final_mean_score: stats_of(&results, |r| r.final_mean_score),
        elapsed_ms: stats_of(&results, |r| r.elapsed_ms as f64),
        rounds_per_sec: stats_of(&results, |r| r.rounds_per_sec),
        individual_runs: results,
    }
}
