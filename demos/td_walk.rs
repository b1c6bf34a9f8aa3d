// Online TD walk on the reference board, rendered to the console while the
// worker thread keeps stepping.
//
// Run:
//   cargo run --example td_walk -- --steps 100000 --seed 42 --every 5000

use std::env;
use std::thread;
use std::time::Duration;

use gridworld_rl::runner::{self, WorkerOptions};
use gridworld_rl::{GridConfig, GridWorld, TemporalDifferenceWalker, WalkerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let max_steps: usize = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(WalkerConfig::default().max_steps);
    let seed: Option<u64> = arg_value(&args, "--seed").and_then(|s| s.parse().ok());
    let every: usize = arg_value(&args, "--every")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5_000);

    let grid = GridWorld::from_config(&GridConfig::default())?;
    let walker = TemporalDifferenceWalker::new(
        grid,
        WalkerConfig {
            max_steps,
            seed,
            ..WalkerConfig::default()
        },
    )?;

    let handle = runner::spawn(
        walker,
        WorkerOptions {
            publish_every: every,
            capacity: 4,
        },
    );

    while !handle.is_finished() {
        if let Some(view) = handle.latest() {
            println!("SARSA steps #{}", view.iteration);
            println!("{}", view);
        }
        thread::sleep(Duration::from_millis(10));
    }

    let walker = handle.join()?;
    println!("{}", gridworld_rl::ValueAlgorithm::view(&walker));
    println!("{}", walker.summary());
    Ok(())
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
