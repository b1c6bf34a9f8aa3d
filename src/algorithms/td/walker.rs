//! Single-agent online TD(0) walker with SARSA-style in-place updates.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::exploration::choose_target;
use crate::algorithms::ValueAlgorithm;
use crate::config::WalkerConfig;
use crate::error::{GridError, Result};
use crate::grid::{Coord, GridWorld, TransitionModel};
use crate::view::GridView;

/// What happened on one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    /// 1-based index of the step just taken.
    pub step: usize,
    /// Position before the step; the only cell whose value was updated.
    pub from: Coord,
    /// Cell the walker tried to enter.
    pub target: Coord,
    /// Whether `target` came from the teleport branch.
    pub explored: bool,
    /// Position after the step (`from` when `target` is blocked).
    pub to: Coord,
    /// `r + γ·V' − V` before scaling by α.
    pub td_error: f64,
}

/// Counters accumulated over a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub steps: usize,
    pub teleports: usize,
    pub bumps: usize,
}

impl fmt::Display for WalkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps ({} teleports, {} wall bumps)",
            self.steps, self.teleports, self.bumps
        )
    }
}

/// Online value learner driven by one wandering agent.
///
/// Per step the agent picks a target (a neighbor, or with probability ε any
/// cell on the board), updates only its current cell
///
/// ```text
/// V(s) += α · (r(s) + γ · V' − V(s))
/// ```
///
/// and moves to the target unless it is blocked. `V'` is the start cell's
/// value when standing on the goal, the agent's own value when the target is
/// blocked, and the target's value otherwise.
///
/// The walker never stops on its own; drivers check
/// [`TemporalDifferenceWalker::is_done`] against the step budget.
#[derive(Debug, Clone)]
pub struct TemporalDifferenceWalker {
    config: WalkerConfig,
    grid: GridWorld,
    model: TransitionModel,
    position: Coord,
    summary: WalkSummary,
    rng: StdRng,
}

impl TemporalDifferenceWalker {
    /// Creates a walker that takes sole ownership of `grid`.
    ///
    /// The agent starts at `config.initial_position`, or at the goal when
    /// unset. Fails with [`GridError::OutOfRange`] if that position is off
    /// the board.
    pub fn new(grid: GridWorld, config: WalkerConfig) -> Result<Self> {
        let position = config.initial_position.unwrap_or_else(|| grid.goal());
        if !grid.contains(position) {
            return Err(GridError::OutOfRange {
                coord: position,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            alpha = config.alpha,
            gamma = config.gamma,
            epsilon = config.epsilon,
            max_steps = config.max_steps,
            position = %position,
            "td walker created"
        );

        Ok(Self {
            model: TransitionModel::for_grid(&grid),
            config,
            grid,
            position,
            summary: WalkSummary::default(),
            rng,
        })
    }

    /// Takes one step, updating exactly one cell's value.
    pub fn step(&mut self) -> WalkStep {
        let from = self.position;
        let neighbors = self.model.neighbors(from);
        let choice = choose_target(
            &mut self.rng,
            from,
            &neighbors,
            self.grid.rows(),
            self.grid.cols(),
            self.config.epsilon,
        );
        let target = choice.coord;

        let future = if self.grid.is_goal(from) {
            self.grid.value(self.grid.start())
        } else {
            TransitionModel::resolve(from, target, &self.grid)
        };

        let td_error = self.grid.reward(from) + self.config.gamma * future - self.grid.value(from);
        if self.grid.is_blocked(from) {
            // Only reachable from a blocked initial position.
            trace!(position = %from, "walker on a blocked cell; value left untouched");
        } else {
            *self.grid.value_mut(from) += self.config.alpha * td_error;
        }

        let blocked = self.grid.is_blocked(target);
        let to = if blocked { from } else { target };
        self.position = to;

        self.summary.steps += 1;
        if choice.explored {
            self.summary.teleports += 1;
        }
        if blocked {
            self.summary.bumps += 1;
        }

        trace!(
            step = self.summary.steps,
            from = %from,
            target = %target,
            explored = choice.explored,
            td_error,
            "walker step"
        );
        if self.summary.steps == self.config.max_steps {
            info!(summary = %self.summary, "td walk budget exhausted");
        }

        WalkStep {
            step: self.summary.steps,
            from,
            target,
            explored: choice.explored,
            to,
            td_error,
        }
    }

    /// Steps until the budget is exhausted.
    pub fn run(&mut self) -> WalkSummary {
        while !self.is_done() {
            self.step();
        }
        self.summary
    }

    /// Whether the step budget is exhausted.
    pub fn is_done(&self) -> bool {
        self.summary.steps >= self.config.max_steps
    }

    /// Current agent position.
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Number of steps taken.
    pub fn steps(&self) -> usize {
        self.summary.steps
    }

    pub fn summary(&self) -> WalkSummary {
        self.summary
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Gives the grid back, ending the walker's ownership.
    pub fn into_grid(self) -> GridWorld {
        self.grid
    }
}

impl ValueAlgorithm for TemporalDifferenceWalker {
    type Report = WalkStep;

    fn advance(&mut self) -> WalkStep {
        self.step()
    }

    fn is_done(&self) -> bool {
        TemporalDifferenceWalker::is_done(self)
    }

    fn iterations(&self) -> usize {
        self.summary.steps
    }

    fn grid(&self) -> &GridWorld {
        &self.grid
    }

    fn view(&self) -> GridView {
        GridView::capture(&self.grid, Some(self.position), self.summary.steps)
    }

    fn name(&self) -> &str {
        "td_walk"
    }
}
