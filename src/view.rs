//! Read-only snapshots handed to renderers.
//!
//! A [`GridView`] is a copy taken from the owning algorithm, so a renderer on
//! another thread never reads the live grid.

use std::fmt;

use crate::grid::{Coord, GridWorld};

/// What a renderer needs to know about one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub blocked: bool,
    pub value: f64,
}

/// Immutable copy of the grid state after a sweep or a batch of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major cells.
    pub cells: Vec<CellView>,
    /// Walker position, if the producer has one.
    pub agent: Option<Coord>,
    /// Sweeps or steps completed when the view was taken.
    pub iteration: usize,
}

impl GridView {
    /// Copies the renderer-visible state out of `grid`.
    pub fn capture(grid: &GridWorld, agent: Option<Coord>, iteration: usize) -> Self {
        let cells = grid
            .coords()
            .map(|c| CellView {
                blocked: grid.is_blocked(c),
                value: grid.value(c),
            })
            .collect();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
            agent,
            iteration,
        }
    }

    /// Cell at `coord`, or `None` if off the board.
    pub fn cell(&self, coord: Coord) -> Option<&CellView> {
        if !coord.in_bounds(self.rows, self.cols) {
            return None;
        }
        self.cells.get(coord.index(self.cols))
    }
}

/// Tab-separated console table, one line per row, followed by a blank line.
///
/// Evaluator views (no agent) print walls as `XXXXX`. Walker views print the
/// agent as `OOOOO`, walls as `*****`, and unvisited zero-valued cells as
/// `-----`. Every other cell is its value with sign and two decimals.
impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let walker = self.agent.is_some();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let coord = Coord::new(row, col);
                let cell = &self.cells[coord.index(self.cols)];
                if self.agent == Some(coord) {
                    write!(f, "OOOOO\t")?;
                } else if cell.blocked {
                    write!(f, "{}\t", if walker { "*****" } else { "XXXXX" })?;
                } else if walker && cell.value == 0.0 {
                    write!(f, "-----\t")?;
                } else {
                    write!(f, "{:+.2}\t", cell.value)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
