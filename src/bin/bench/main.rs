// Resonance Benchmark Runner v1.0.0 — Evolution Hypothesis Validation
// Monte Carlo (N=30), seedable PRNG, per-round audit trail
//
// Usage:
//   cargo run --release --bin bench                       # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5           # Quick mode (5 runs each)
//   cargo run --release --bin bench -- EVO_FUSION         # Filter by name
//   cargo run --release --bin bench -- --time-series      # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42          # Custom base seed
//   cargo run --release --bin bench -- --config run.toml  # Single custom scenario
//   cargo run --release --bin bench -- --models           # Also run the peripheral models

mod report;
mod scenarios;
mod monte_carlo;
mod metrics;
mod models;
mod time_series;

use clap::Parser;
use report::*;
use scenarios::*;
use metrics::run_resonance_comparison;
use resonance_engine::{ConfigError, SimConfig};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A scenario passes when at least this share of its runs pass (28 of 30).
const PASS_THRESHOLD: f64 = 0.933;

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Monte Carlo benchmark for the resonance evolution engine")]
struct Args {
    /// Runs per scenario
    #[arg(long, default_value_t = 30)]
    runs: usize,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write per-round JSONL under <output-dir>/time-series
    #[arg(long)]
    time_series: bool,

    /// Run a single scenario described by a TOML config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the JSON report
    #[arg(long, default_value = "benchmark-results")]
    output_dir: PathBuf,

    /// Also run the feedback, cooperation, contact and consistency models
    #[arg(long)]
    models: bool,

    /// Case-insensitive filter on scenario name, label or category
    filter: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no scenarios match filter {0:?}")]
    NoScenarios(Option<String>),
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("  Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn select(args: &Args) -> Result<Vec<Scenario>, BenchError> {
    if let Some(path) = &args.config {
        let config = SimConfig::from_file(path)?;
        config.validate()?;
        return Ok(vec![Scenario::custom(config)]);
    }

    let all = scenarios();
    let to_run: Vec<Scenario> = match &args.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all.into_iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all,
    };
    if to_run.is_empty() {
        return Err(BenchError::NoScenarios(args.filter.clone()));
    }
    Ok(to_run)
}

/// Returns whether every scenario and every exercised hypothesis passed.
fn run(args: &Args) -> Result<bool, BenchError> {
    let to_run = select(args)?;
    let ts_dir = args.time_series.then(|| args.output_dir.join("time-series"));

    println!("\n  Resonance Benchmark Runner v1.0.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", args.runs, args.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<34} {:>5} {:>12} {:>10} {:>8} {:>7} {:>7}",
        "Scenario", "Pass%", "Final%", "2ndHalf%", "Fused%", "Std", "Time");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(scenario, args.runs, args.seed, ts_dir.as_deref())?;

        let pass_pct = report.pass_rate * 100.0;
        let final_mean = report.final_ratio.mean * 100.0;
        let final_ci = (report.final_ratio.ci_upper - report.final_ratio.ci_lower) * 50.0;
        let status = if report.pass_rate >= PASS_THRESHOLD { "PASS" } else { "FAIL" };

        println!("  {:<34} {:>4}% {:>6.1}±{:<4.1} {:>9.1}% {:>7.1}% {:>7.3} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            final_mean, final_ci,
            report.second_half_mean_ratio.mean * 100.0,
            report.fusion_rate * 100.0,
            report.second_half_std_ratio.mean,
            report.elapsed_ms.mean,
            status,
        );
        tracing::info!(scenario = %report.scenario_name, pass_rate = report.pass_rate, "scenario complete");

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Hypothesis Validation ──────────────────────────────────────────

    let passes = |name: &str| {
        mc_reports.iter()
            .find(|r| r.scenario_name == name)
            .map(|r| r.pass_rate >= PASS_THRESHOLD)
            .unwrap_or(true) // If not run, don't fail
    };

    // Paired comparison on an invaded population; identical all-Cooperate
    // starts never separate.
    let comparison_detail = if mc_reports.iter().any(|r| r.scenario_name.ends_with("_INVASION")) {
        Some(run_resonance_comparison(
            resonance_engine::config::DEFAULT_POPULATION,
            10,
            100,
            args.runs,
            args.seed,
        )?)
    } else {
        None
    };

    let validation = HypothesisValidation {
        convergence: passes("EVO_CONVERGENCE"),
        comparison: comparison_detail.as_ref().map(|c| c.passes).unwrap_or(true),
        stability: passes("EVO_STABILITY"),
        fusion: passes("EVO_FUSION"),
        comparison_detail,
    };

    // ─── Summary ────────────────────────────────────────────────────────

    let summary = Summary::from_reports(&mc_reports, PASS_THRESHOLD);

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        summary.total, summary.passed, summary.failed, suite_elapsed.as_secs_f64());

    let mark = |ok: bool| if ok { "PASS" } else { "FAIL" };
    println!("  Hypothesis Validation:");
    println!("    Convergence >80%:     {}", mark(validation.convergence));
    println!("    With > Without:       {}", mark(validation.comparison));
    if let Some(c) = &validation.comparison_detail {
        println!("      with {:.1}%  without {:.1}%  ({}/{} pairs)",
            c.with_resonance.mean * 100.0, c.without_resonance.mean * 100.0, c.pair_wins, c.pairs);
    }
    println!("    Stability:            {}", mark(validation.stability));
    println!("    Fusion (30 rounds):   {}\n", mark(validation.fusion));

    let models = if args.models {
        let report = models::run_models(args.seed);
        models::print_models(&report);
        Some(report)
    } else {
        None
    };

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);

    let all_ok = summary.failed == 0 && validation.all_pass();
    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "1.0.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: args.runs,
        base_seed: args.seed,
        summary,
        hypothesis_validation: validation,
        scenarios: mc_reports,
        models,
    };

    std::fs::create_dir_all(&args.output_dir)?;
    let path = args.output_dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, &json)?;
    println!("  Results saved to: {}\n", path.display());

    Ok(all_ok)
}
