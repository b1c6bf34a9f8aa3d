//! Neighbor enumeration and wall/boundary semantics shared by both algorithms.

use super::types::Coord;
use super::world::GridWorld;
use crate::error::{GridError, Result};

/// One of the four axis-aligned moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in enumeration order. Neighbor lists follow this order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// `(d_row, d_col)` displacement.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }
}

/// Where a cell can go under the uniform random policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Successors {
    /// The goal cell: a single deterministic jump back to start.
    Absorbing { target: Coord },
    /// Equiprobable moves to each in-bounds neighbor.
    Uniform {
        probability: f64,
        neighbors: Vec<Coord>,
    },
    /// No in-bounds neighbor at all (a 1×1 board).
    Degenerate,
}

/// Transition rules of the grid.
///
/// Off-grid moves are removed from the action set rather than bounced back,
/// so a corner has two actions (probability 0.5 each) and an edge three.
/// Moving into a blocked cell leaves the agent where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionModel {
    rows: usize,
    cols: usize,
    start: Coord,
    goal: Coord,
}

impl TransitionModel {
    /// Builds the model matching a grid's geometry and special cells.
    pub fn for_grid(grid: &GridWorld) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            start: grid.start(),
            goal: grid.goal(),
        }
    }

    /// The in-bounds subset of up, down, left and right, in that order.
    pub fn valid_neighbors(coord: Coord, rows: usize, cols: usize) -> Vec<Coord> {
        Action::ALL
            .iter()
            .filter_map(|a| {
                let (dr, dc) = a.delta();
                coord.offset(dr, dc)
            })
            .filter(|c| c.in_bounds(rows, cols))
            .collect()
    }

    /// [`TransitionModel::valid_neighbors`] for this model's grid.
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        Self::valid_neighbors(coord, self.rows, self.cols)
    }

    /// Probability of each action from `coord`: `1 / |valid neighbors|`.
    pub fn action_probability(&self, coord: Coord) -> Result<f64> {
        match self.neighbors(coord).len() {
            0 => Err(GridError::DegenerateCell(coord)),
            n => Ok(1.0 / n as f64),
        }
    }

    /// Value the agent lands on when attempting `from → neighbor`.
    ///
    /// A blocked neighbor is a self-loop, so the current cell's own value is
    /// returned instead of the neighbor's.
    ///
    /// # Panics
    ///
    /// Panics if `neighbor` (or, for a blocked neighbor, `from`) is off the board.
    pub fn resolve(from: Coord, neighbor: Coord, grid: &GridWorld) -> f64 {
        if grid.is_blocked(neighbor) {
            grid.value(from)
        } else {
            grid.value(neighbor)
        }
    }

    /// Successor distribution of `coord`.
    pub fn successors(&self, coord: Coord) -> Successors {
        if coord == self.goal {
            return Successors::Absorbing { target: self.start };
        }
        let neighbors = self.neighbors(coord);
        if neighbors.is_empty() {
            return Successors::Degenerate;
        }
        Successors::Uniform {
            probability: 1.0 / neighbors.len() as f64,
            neighbors,
        }
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }
}
