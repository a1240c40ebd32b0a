// Peripheral Model Runs — feedback loop, human/AI cooperation, contact, consistency
// One seeded ChaCha8Rng drives all stochastic models in a fixed order

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use resonance_engine::consistency::{run_all_checks, ConsistencyReport};
use resonance_engine::contact::{run_contact, ContactReport, DEFAULT_CONTACTS};
use resonance_engine::cooperation::{CooperationScenario, CooperationSummary, DEFAULT_INTERACTIONS};
use resonance_engine::dimensions::{assess_system_health, SystemHealth};
use resonance_engine::feedback::{analyze, run_comparison, FeedbackAnalysis};

pub const FEEDBACK_ITERATIONS: usize = 100;
pub const ASSESSED_SYSTEM: &str = "resonance engine";

#[derive(Debug, Clone, Serialize)]
pub struct CooperationRun {
    pub scenario: CooperationScenario,
    pub label: &'static str,
    pub summary: CooperationSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub feedback: FeedbackAnalysis,
    pub cooperation: Vec<CooperationRun>,
    pub contact: ContactReport,
    pub consistency: ConsistencyReport,
    pub health: SystemHealth,
}

pub fn run_models(seed: u64) -> ModelReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let feedback = analyze(&run_comparison(&mut rng, FEEDBACK_ITERATIONS));

    let cooperation = CooperationScenario::ALL
        .iter()
        .map(|&scenario| {
            let mut model = scenario.model();
            model.run(DEFAULT_INTERACTIONS, &mut rng);
            CooperationRun { scenario, label: scenario.label(), summary: model.summary() }
        })
        .collect();

    let contact = run_contact(&mut rng, DEFAULT_CONTACTS);
    let consistency = run_all_checks();
    let health = assess_system_health(ASSESSED_SYSTEM);

    ModelReport { feedback, cooperation, contact, consistency, health }
}

fn mark(ok: bool) -> &'static str {
    if ok { "PASS" } else { "FAIL" }
}

pub fn print_models(report: &ModelReport) {
    let fb = &report.feedback;
    println!("  Feedback Loop (open vs closed, {} iterations):", FEEDBACK_ITERATIONS);
    println!("    Effectiveness  {:>8.3} {:>8.3}  x{:.2}", fb.effectiveness.open, fb.effectiveness.closed, fb.effectiveness.ratio);
    println!("    Resilience     {:>8.3} {:>8.3}  x{:.2}", fb.resilience.open, fb.resilience.closed, fb.resilience.ratio);
    println!("    Innovation     {:>8.3} {:>8.3}  x{:.2}", fb.innovation.open, fb.innovation.closed, fb.innovation.ratio);
    println!("    Open dominates: {}\n", mark(fb.open_dominates()));

    println!("  Human/AI Cooperation ({} interactions each):", DEFAULT_INTERACTIONS);
    for run in &report.cooperation {
        let s = &run.summary;
        println!("    {:<28} accept {:>5.1}%  resonance {:.3}  trust {:.2}  transparency {:.2}",
            run.label, s.acceptance_rate * 100.0, s.avg_resonance, s.final_trust, s.final_transparency);
    }
    println!();

    let c = &report.contact;
    println!("  Unknown-Intelligence Contact ({} signals):", c.contacts.len());
    println!("    Systemic: {}/{} cooperations, mean adaptation {:.3}",
        c.systemic_cooperations, c.contacts.len(), c.mean_adaptation);
    println!("    Literal:  {}/{} cooperations, mean degradation {:.3}\n",
        c.literal_cooperations, c.contacts.len(), c.mean_degradation);

    let cs = &report.consistency;
    println!("  Consistency: {}/{} checks passed", cs.passed, cs.total);
    for r in &cs.results {
        println!("    [{:?}] {:<28} {}", r.severity, r.name, mark(r.passed));
    }
    println!();

    println!("  Dimension Health ({}):", report.health.system);
    for a in &report.health.dimensions {
        println!("    {}: {}", a.label, a.title);
        println!("      ? {}", a.question);
        println!("      factors: {}", a.core_factors.join(", "));
        println!("      risks:   {}", a.risk_factors.join(", "));
    }
    println!();
}
