//! Synchronous Bellman expectation sweeps under the uniform random policy.

use std::fmt;

use tracing::{debug, info, trace};

use super::convergence::ConvergenceMetric;
use crate::algorithms::ValueAlgorithm;
use crate::config::EvaluatorConfig;
use crate::error::GridError;
use crate::grid::{Coord, GridWorld, Successors, TransitionModel};
use crate::view::GridView;

/// Result of a single sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    /// 1-based index of the sweep just completed.
    pub sweep: usize,
    /// Change measured by the configured [`ConvergenceMetric`].
    pub delta: f64,
    /// Whether `delta` fell below the convergence threshold.
    pub converged: bool,
}

/// Result of running the evaluator to completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOutcome {
    pub sweeps: usize,
    pub delta: f64,
    pub converged: bool,
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.converged {
            write!(
                f,
                "converged after {} sweeps (delta {:.6})",
                self.sweeps, self.delta
            )
        } else {
            write!(
                f,
                "stopped after {} sweeps without converging (delta {:.6})",
                self.sweeps, self.delta
            )
        }
    }
}

/// Iterative policy evaluation over a [`GridWorld`].
///
/// Each sweep computes every non-blocked cell's backup from the previous
/// sweep's values into a second buffer, then swaps that buffer in. No cell
/// ever sees another cell's new value mid-sweep, so the result does not
/// depend on visiting order.
///
/// Backup per cell:
/// ```text
/// goal:            r(goal) + γ · V(start)
/// no neighbors:    0
/// otherwise:       Σ_n p · (r(cell) + γ · V'(cell, n))
/// ```
/// where `p = 1 / |neighbors|` and `V'` is [`TransitionModel::resolve`].
///
/// # Lifecycle
///
/// 1. Construct with [`PolicyEvaluator::new`], handing over the grid.
/// 2. Call [`PolicyEvaluator::sweep`] until [`PolicyEvaluator::is_done`], or
///    call [`PolicyEvaluator::run`].
/// 3. Take the grid back with [`PolicyEvaluator::into_grid`].
#[derive(Debug, Clone)]
pub struct PolicyEvaluator {
    config: EvaluatorConfig,
    grid: GridWorld,
    model: TransitionModel,
    /// Staging buffer; holds the previous sweep's values right after a swap.
    next: Vec<f64>,
    sweeps: usize,
    last_delta: Option<f64>,
    converged: bool,
}

impl PolicyEvaluator {
    /// Creates an evaluator that takes sole ownership of `grid`.
    pub fn new(grid: GridWorld, config: EvaluatorConfig) -> Self {
        let model = TransitionModel::for_grid(&grid);
        let next = grid.values().to_vec();
        debug!(
            gamma = config.gamma,
            threshold = config.convergence_threshold,
            max_sweeps = config.max_sweeps,
            metric = ?config.metric,
            "policy evaluator created"
        );
        Self {
            config,
            grid,
            model,
            next,
            sweeps: 0,
            last_delta: None,
            converged: false,
        }
    }

    /// Backup of a single cell computed from the grid's current values.
    ///
    /// Blocked cells are not backed up; their current value is returned.
    pub fn backup(&self, coord: Coord) -> f64 {
        backup(&self.grid, &self.model, self.config.gamma, coord)
    }

    /// Performs one full synchronous sweep.
    pub fn sweep(&mut self) -> SweepReport {
        let gamma = self.config.gamma;
        for (i, coord) in self.grid.coords().enumerate() {
            self.next[i] = backup(&self.grid, &self.model, gamma, coord);
        }
        self.grid.swap_values(&mut self.next);

        let delta = self.config.metric.measure(&self.next, self.grid.values());
        self.sweeps += 1;
        self.last_delta = Some(delta);
        self.converged = delta < self.config.convergence_threshold;

        debug!(sweep = self.sweeps, delta, "sweep complete");
        if self.converged {
            info!(sweeps = self.sweeps, delta, "policy evaluation converged");
        } else if self.sweeps >= self.config.max_sweeps {
            info!(
                sweeps = self.sweeps,
                delta, "policy evaluation hit the sweep cap without converging"
            );
        }

        SweepReport {
            sweep: self.sweeps,
            delta,
            converged: self.converged,
        }
    }

    /// Sweeps until converged or the sweep cap is reached.
    pub fn run(&mut self) -> EvaluationOutcome {
        while !self.is_done() {
            self.sweep();
        }
        self.outcome()
    }

    /// Summary of the sweeps performed so far.
    pub fn outcome(&self) -> EvaluationOutcome {
        EvaluationOutcome {
            sweeps: self.sweeps,
            delta: self.last_delta.unwrap_or(f64::INFINITY),
            converged: self.converged,
        }
    }

    /// Whether the last sweep met the convergence threshold.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Converged, or the sweep budget is exhausted.
    pub fn is_done(&self) -> bool {
        self.converged || self.sweeps >= self.config.max_sweeps
    }

    /// Number of sweeps completed.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Delta reported by the last sweep, if any.
    pub fn last_delta(&self) -> Option<f64> {
        self.last_delta
    }

    pub fn metric(&self) -> ConvergenceMetric {
        self.config.metric
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Gives the grid back, ending the evaluator's ownership.
    pub fn into_grid(self) -> GridWorld {
        self.grid
    }
}

fn backup(grid: &GridWorld, model: &TransitionModel, gamma: f64, coord: Coord) -> f64 {
    if grid.is_blocked(coord) {
        return grid.value(coord);
    }
    let reward = grid.reward(coord);
    match model.successors(coord) {
        Successors::Absorbing { target } => reward + gamma * grid.value(target),
        Successors::Degenerate => {
            trace!("{}; backing up to 0", GridError::DegenerateCell(coord));
            0.0
        }
        Successors::Uniform {
            probability,
            neighbors,
        } => neighbors
            .into_iter()
            .map(|n| probability * (reward + gamma * TransitionModel::resolve(coord, n, grid)))
            .sum(),
    }
}

impl ValueAlgorithm for PolicyEvaluator {
    type Report = SweepReport;

    fn advance(&mut self) -> SweepReport {
        self.sweep()
    }

    fn is_done(&self) -> bool {
        PolicyEvaluator::is_done(self)
    }

    fn iterations(&self) -> usize {
        self.sweeps
    }

    fn grid(&self) -> &GridWorld {
        &self.grid
    }

    fn view(&self) -> GridView {
        GridView::capture(&self.grid, None, self.sweeps)
    }

    fn name(&self) -> &str {
        "policy_evaluation"
    }
}
