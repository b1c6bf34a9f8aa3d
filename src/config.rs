//! Configuration for the grid world and the two value-learning algorithms.
//!
//! Every struct carries the reference values of the classic 10×10 board as its
//! `Default`, and all of them are immutable for the duration of a run.

use crate::algorithms::evaluation::ConvergenceMetric;
use crate::error::{GridError, Result};
use crate::grid::Coord;

/// Grid geometry, reward layout and special cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Cells whose reward is -1.
    pub negative_rewards: Vec<Coord>,
    /// Cells whose reward is +1 (applied after the negative list).
    pub positive_rewards: Vec<Coord>,
    /// Impassable cells.
    pub blocked: Vec<Coord>,
    /// Target of the goal cell's deterministic transition.
    pub start: Coord,
    /// Cell whose only successor is `start`.
    pub goal: Coord,
}

impl GridConfig {
    /// Default goal position of the reference board.
    pub const DEFAULT_GOAL: Coord = Coord::new(5, 5);

    /// An empty board: no rewards, no walls, start at the origin and the
    /// default goal clamped into bounds.
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            negative_rewards: Vec::new(),
            positive_rewards: Vec::new(),
            blocked: Vec::new(),
            start: Coord::origin(),
            goal: Coord::new(
                Self::DEFAULT_GOAL.row.min(rows.saturating_sub(1)),
                Self::DEFAULT_GOAL.col.min(cols.saturating_sub(1)),
            ),
        }
    }

    /// Checks dimensions and that every configured coordinate is on the grid.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let all = self
            .negative_rewards
            .iter()
            .chain(&self.positive_rewards)
            .chain(&self.blocked)
            .chain([&self.start, &self.goal]);
        for coord in all {
            if !coord.in_bounds(self.rows, self.cols) {
                return Err(GridError::OutOfRange {
                    coord: *coord,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        Ok(())
    }

    /// Lists warning-level layout problems.
    ///
    /// None of these prevent construction: overlapping reward lists resolve
    /// as "last write wins" and blocked cells keep a zero reward.
    pub fn misconfigurations(&self) -> Vec<GridError> {
        let mut issues = Vec::new();

        for coord in &self.negative_rewards {
            if self.positive_rewards.contains(coord) {
                issues.push(GridError::MisconfiguredReward {
                    coord: *coord,
                    reason: "listed as both negative and positive".into(),
                });
            }
        }

        for coord in self.negative_rewards.iter().chain(&self.positive_rewards) {
            if self.blocked.contains(coord) {
                issues.push(GridError::MisconfiguredReward {
                    coord: *coord,
                    reason: "reward assigned to a blocked cell".into(),
                });
            }
        }

        for (coord, role) in [(self.start, "start"), (self.goal, "goal")] {
            if self.blocked.contains(&coord) {
                issues.push(GridError::MisconfiguredReward {
                    coord,
                    reason: format!("{} cell is blocked", role),
                });
            }
        }

        issues
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        let c = Coord::new;
        Self {
            rows: 10,
            cols: 10,
            negative_rewards: vec![
                c(3, 3),
                c(4, 5),
                c(4, 6),
                c(5, 6),
                c(5, 8),
                c(6, 8),
                c(7, 3),
                c(7, 5),
                c(7, 6),
            ],
            positive_rewards: vec![Self::DEFAULT_GOAL],
            blocked: vec![
                c(2, 1),
                c(2, 2),
                c(2, 3),
                c(2, 4),
                c(2, 6),
                c(2, 7),
                c(2, 8),
                c(3, 4),
                c(4, 4),
                c(5, 4),
                c(6, 4),
                c(7, 4),
            ],
            start: Coord::origin(),
            goal: Self::DEFAULT_GOAL,
        }
    }
}

/// Parameters of the synchronous policy evaluator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatorConfig {
    /// Discount factor γ.
    pub gamma: f64,
    /// Sweeps stop once the convergence metric falls below this value.
    pub convergence_threshold: f64,
    /// Hard cap on the number of sweeps.
    pub max_sweeps: usize,
    /// How the change between two sweeps is measured.
    pub metric: ConvergenceMetric,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            convergence_threshold: 0.001,
            max_sweeps: 10_000,
            metric: ConvergenceMetric::SignedSum,
        }
    }
}

/// Parameters of the online temporal-difference walker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkerConfig {
    /// Learning rate α.
    pub alpha: f64,
    /// Discount factor γ.
    pub gamma: f64,
    /// Probability of teleporting to a uniformly random cell.
    pub epsilon: f64,
    /// Step budget.
    pub max_steps: usize,
    /// Where the agent starts; `None` means the goal cell.
    pub initial_position: Option<Coord>,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.3,
            max_steps: 100_000,
            initial_position: None,
            seed: None,
        }
    }
}

/// Everything a driver needs for one run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub grid: GridConfig,
    pub evaluator: EvaluatorConfig,
    pub walker: WalkerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = GridConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.cols, 10);
        assert_eq!(cfg.goal, Coord::new(5, 5));
        assert_eq!(cfg.start, Coord::new(0, 0));
        assert_eq!(cfg.blocked.len(), 12);
        assert_eq!(cfg.negative_rewards.len(), 9);
    }

    #[test]
    fn default_layout_is_well_formed() {
        assert!(GridConfig::default().misconfigurations().is_empty());
    }

    #[test]
    fn default_algorithm_parameters() {
        let ev = EvaluatorConfig::default();
        assert_eq!(ev.gamma, 0.9);
        assert_eq!(ev.convergence_threshold, 0.001);
        assert_eq!(ev.max_sweeps, 10_000);
        assert_eq!(ev.metric, ConvergenceMetric::SignedSum);

        let wk = WalkerConfig::default();
        assert_eq!(wk.alpha, 0.5);
        assert_eq!(wk.epsilon, 0.3);
        assert_eq!(wk.max_steps, 100_000);
        assert_eq!(wk.initial_position, None);
    }

    #[test]
    fn open_clamps_goal_into_small_grids() {
        let cfg = GridConfig::open(3, 8);
        assert_eq!(cfg.goal, Coord::new(2, 5));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let cfg = GridConfig::open(0, 5);
        assert_eq!(
            cfg.validate(),
            Err(GridError::InvalidDimensions { rows: 0, cols: 5 })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let cfg = GridConfig {
            blocked: vec![Coord::new(4, 12)],
            ..GridConfig::open(10, 10)
        };
        assert!(matches!(
            cfg.validate(),
            Err(GridError::OutOfRange { coord, .. }) if coord == Coord::new(4, 12)
        ));
    }

    #[test]
    fn misconfigurations_reports_overlaps() {
        let cfg = GridConfig {
            negative_rewards: vec![Coord::new(1, 1), Coord::new(2, 2)],
            positive_rewards: vec![Coord::new(1, 1)],
            blocked: vec![Coord::new(2, 2), Coord::new(5, 5)],
            ..GridConfig::open(10, 10)
        };
        let issues = cfg.misconfigurations();
        // (1,1) in both lists, reward on blocked (2,2), goal blocked
        assert_eq!(issues.len(), 3);
        assert!(issues
            .iter()
            .all(|e| matches!(e, GridError::MisconfiguredReward { .. })));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn run_config_serde_round_trip() {
        let cfg = RunConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
