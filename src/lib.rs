//! gridworld-rl - value-based reinforcement learning on a fixed grid world.
//!
//! Two algorithms share one grid model:
//!
//! - [`PolicyEvaluator`]: synchronous Bellman expectation sweeps under the
//!   uniform random policy, double buffered, stopping on convergence or a
//!   sweep cap.
//! - [`TemporalDifferenceWalker`]: a single agent wandering the board and
//!   applying online TD(0) updates, with epsilon-driven teleport exploration.
//!
//! Renderers consume [`GridView`] snapshots, optionally produced by a
//! background worker from [`runner::spawn`].

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod runner;
pub mod view;

pub use algorithms::{ConvergenceMetric, PolicyEvaluator, TemporalDifferenceWalker, ValueAlgorithm};
pub use config::{EvaluatorConfig, GridConfig, RunConfig, WalkerConfig};
pub use error::{GridError, Result};
pub use grid::{Cell, Coord, GridWorld, TransitionModel};
pub use view::GridView;
