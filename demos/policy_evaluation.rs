// Console policy evaluation on the reference board.
//
// Run:
//   cargo run --example policy_evaluation -- --sweeps 100 --metric absolute
//
// Set RUST_LOG=debug to see per-sweep deltas.

use std::env;

use gridworld_rl::{ConvergenceMetric, EvaluatorConfig, GridConfig, GridWorld, PolicyEvaluator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let max_sweeps: usize = arg_value(&args, "--sweeps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(EvaluatorConfig::default().max_sweeps);
    let metric = match arg_value(&args, "--metric").unwrap_or("signed") {
        "signed" => ConvergenceMetric::SignedSum,
        "absolute" => ConvergenceMetric::AbsoluteSum,
        "max" => ConvergenceMetric::MaxAbsolute,
        other => {
            eprintln!(
                "Unknown --metric '{}'; expected 'signed', 'absolute' or 'max'.",
                other
            );
            std::process::exit(2);
        }
    };

    let grid = GridWorld::from_config(&GridConfig::default())?;
    let mut evaluator = PolicyEvaluator::new(
        grid,
        EvaluatorConfig {
            max_sweeps,
            metric,
            ..EvaluatorConfig::default()
        },
    );

    println!("{}", gridworld_rl::GridView::capture(evaluator.grid(), None, 0));
    while !evaluator.is_done() {
        let report = evaluator.sweep();
        println!("Policy Evaluation Sweep #{} (delta {:.6})", report.sweep, report.delta);
        println!(
            "{}",
            gridworld_rl::GridView::capture(evaluator.grid(), None, report.sweep)
        );
    }
    println!("{}", evaluator.outcome());
    Ok(())
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
