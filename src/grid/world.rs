//! The grid world: static layout plus the mutable value estimates.

use tracing::{debug, warn};

use super::types::{Cell, Coord, NEGATIVE_REWARD, POSITIVE_REWARD};
use crate::config::GridConfig;
use crate::error::{GridError, Result};

/// A fixed `rows × cols` board of cells addressed by [`Coord`].
///
/// Blocked flags and rewards are set once at construction. Values live in
/// their own row-major buffer so the synchronous evaluator can swap in a
/// freshly computed buffer after each sweep instead of mutating cells one by
/// one.
///
/// # Lifecycle
///
/// 1. Build with [`GridWorld::new`] or [`GridWorld::from_config`].
/// 2. Hand ownership to one algorithm, which mutates values in place.
/// 3. Take [`GridWorld::snapshot`] copies for comparison or display.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    start: Coord,
    goal: Coord,
    blocked: Vec<bool>,
    rewards: Vec<f64>,
    values: Vec<f64>,
}

impl GridWorld {
    /// Creates a grid with the given reward and wall layout.
    ///
    /// Start is the origin and the goal is (5, 5) clamped into bounds; use
    /// [`GridWorld::from_config`] to choose them explicitly.
    ///
    /// # Arguments
    ///
    /// * `negative` - Cells rewarded -1
    /// * `positive` - Cells rewarded +1 (written after `negative`, so they win on overlap)
    /// * `blocked` - Impassable cells
    pub fn new(
        rows: usize,
        cols: usize,
        negative: &[Coord],
        positive: &[Coord],
        blocked: &[Coord],
    ) -> Result<Self> {
        let config = GridConfig {
            negative_rewards: negative.to_vec(),
            positive_rewards: positive.to_vec(),
            blocked: blocked.to_vec(),
            ..GridConfig::open(rows, cols)
        };
        Self::from_config(&config)
    }

    /// Creates a grid from a full configuration.
    ///
    /// Fails with [`GridError::OutOfRange`] if any configured coordinate is off
    /// the board. Layout problems reported by
    /// [`GridConfig::misconfigurations`] are logged and tolerated.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        for issue in config.misconfigurations() {
            warn!("{}", issue);
        }

        let n = config.rows * config.cols;
        let mut grid = Self {
            rows: config.rows,
            cols: config.cols,
            start: config.start,
            goal: config.goal,
            blocked: vec![false; n],
            rewards: vec![0.0; n],
            values: vec![0.0; n],
        };

        for coord in &config.negative_rewards {
            let i = grid.index(*coord);
            grid.rewards[i] = NEGATIVE_REWARD;
        }
        for coord in &config.positive_rewards {
            let i = grid.index(*coord);
            grid.rewards[i] = POSITIVE_REWARD;
        }
        for coord in &config.blocked {
            let i = grid.index(*coord);
            grid.blocked[i] = true;
            grid.rewards[i] = 0.0;
        }

        debug!(
            rows = grid.rows,
            cols = grid.cols,
            blocked = config.blocked.len(),
            start = %grid.start,
            goal = %grid.goal,
            "grid world constructed"
        );
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, blocked ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed grid; present for API symmetry with [`GridWorld::len`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn is_goal(&self, coord: Coord) -> bool {
        coord == self.goal
    }

    /// Returns true if `coord` is on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_bounds(self.rows, self.cols)
    }

    /// Bounds-checked read of one cell.
    pub fn get(&self, coord: Coord) -> Result<Cell> {
        self.check(coord)?;
        let i = self.index(coord);
        Ok(Cell {
            blocked: self.blocked[i],
            reward: self.rewards[i],
            value: self.values[i],
        })
    }

    /// Bounds-checked write of one cell's value.
    pub fn set(&mut self, coord: Coord, value: f64) -> Result<()> {
        self.check(coord)?;
        let i = self.index(coord);
        self.values[i] = value;
        Ok(())
    }

    /// Current value of an on-board cell.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid; use [`GridWorld::get`] for a
    /// checked read.
    pub fn value(&self, coord: Coord) -> f64 {
        self.values[self.checked_index(coord)]
    }

    /// Reward of an on-board cell. Panics like [`GridWorld::value`].
    pub fn reward(&self, coord: Coord) -> f64 {
        self.rewards[self.checked_index(coord)]
    }

    /// Whether an on-board cell is blocked. Panics like [`GridWorld::value`].
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.blocked[self.checked_index(coord)]
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.len()).map(move |i| Coord::from_index(i, self.cols))
    }

    /// Independent deep copy of the whole grid.
    pub fn snapshot(&self) -> GridWorld {
        self.clone()
    }

    /// Replaces the value buffer with `next`, leaving the old values in `next`.
    pub(crate) fn swap_values(&mut self, next: &mut Vec<f64>) {
        debug_assert_eq!(next.len(), self.values.len());
        std::mem::swap(&mut self.values, next);
    }

    pub(crate) fn value_mut(&mut self, coord: Coord) -> &mut f64 {
        let i = self.checked_index(coord);
        &mut self.values[i]
    }

    fn index(&self, coord: Coord) -> usize {
        coord.index(self.cols)
    }

    // An off-board column would otherwise alias a cell of the next row.
    fn checked_index(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate {} is outside the {}x{} grid",
            coord,
            self.rows,
            self.cols
        );
        self.index(coord)
    }

    fn check(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_grid() -> GridWorld {
        GridWorld::from_config(&GridConfig::default()).unwrap()
    }

    #[test]
    fn construct_zeroes_values() {
        let grid = reference_grid();
        assert_eq!(grid.len(), 100);
        assert!(grid.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn construct_applies_rewards_and_blocks() {
        let grid = reference_grid();
        assert_eq!(grid.reward(Coord::new(3, 3)), -1.0);
        assert_eq!(grid.reward(Coord::new(5, 5)), 1.0);
        assert_eq!(grid.reward(Coord::new(0, 0)), 0.0);
        assert!(grid.is_blocked(Coord::new(2, 1)));
        assert!(grid.is_blocked(Coord::new(7, 4)));
        assert!(!grid.is_blocked(Coord::new(2, 5)));
    }

    #[test]
    fn positive_list_wins_on_overlap() {
        let c = Coord::new(1, 1);
        let grid = GridWorld::new(4, 4, &[c], &[c], &[]).unwrap();
        assert_eq!(grid.reward(c), 1.0);
    }

    #[test]
    fn blocked_cells_have_zero_reward() {
        let c = Coord::new(1, 2);
        let grid = GridWorld::new(4, 4, &[c], &[], &[c]).unwrap();
        let cell = grid.get(c).unwrap();
        assert!(cell.blocked);
        assert_eq!(cell.reward, 0.0);
        assert_eq!(cell.value, 0.0);
    }

    #[test]
    fn construct_rejects_off_grid_coordinates() {
        let err = GridWorld::new(4, 4, &[Coord::new(4, 0)], &[], &[]).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfRange {
                coord: Coord::new(4, 0),
                rows: 4,
                cols: 4
            }
        );
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = GridWorld::new(3, 3, &[], &[], &[]).unwrap();
        assert!(grid.set(Coord::new(2, 2), 4.5).is_ok());
        assert_eq!(grid.get(Coord::new(2, 2)).unwrap().value, 4.5);
        assert!(matches!(
            grid.get(Coord::new(3, 0)),
            Err(GridError::OutOfRange { .. })
        ));
        assert!(matches!(
            grid.set(Coord::new(0, 3), 1.0),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "outside the 10x10 grid")]
    fn value_rejects_off_grid_column() {
        let mut grid = GridWorld::from_config(&GridConfig::open(10, 10)).unwrap();
        grid.set(Coord::new(1, 0), 42.0).unwrap();
        grid.value(Coord::new(0, 10));
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 grid")]
    fn is_blocked_rejects_off_grid_column() {
        let grid = GridWorld::new(3, 3, &[], &[], &[Coord::new(1, 0)]).unwrap();
        grid.is_blocked(Coord::new(0, 3));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut grid = reference_grid();
        let snap = grid.snapshot();
        grid.set(Coord::new(0, 0), 7.0).unwrap();
        assert_eq!(snap.value(Coord::new(0, 0)), 0.0);
        assert_eq!(grid.value(Coord::new(0, 0)), 7.0);
    }

    #[test]
    fn swap_values_exchanges_buffers() {
        let mut grid = GridWorld::new(1, 2, &[], &[], &[]).unwrap();
        let mut next = vec![1.0, 2.0];
        grid.swap_values(&mut next);
        assert_eq!(grid.values(), &[1.0, 2.0]);
        assert_eq!(next, vec![0.0, 0.0]);
    }

    #[test]
    fn coords_are_row_major() {
        let grid = GridWorld::new(2, 3, &[], &[], &[]).unwrap();
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[2], Coord::new(0, 2));
        assert_eq!(coords[3], Coord::new(1, 0));
        assert_eq!(coords.len(), 6);
    }
}
