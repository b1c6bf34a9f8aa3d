//! Core grid types.
//!
//! Defines integer grid coordinates and the read-only cell view handed out by
//! [`super::GridWorld`].

use std::fmt;

/// Reward assigned to every coordinate of the negative-reward list.
pub const NEGATIVE_REWARD: f64 = -1.0;

/// Reward assigned to every coordinate of the positive-reward list.
pub const POSITIVE_REWARD: f64 = 1.0;

/// A `(row, col)` grid position, both 0-indexed, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Origin coordinate (0, 0).
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Returns true if the coordinate lies within `[0, rows) × [0, cols)`.
    pub fn in_bounds(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Row-major flat index for a grid with `cols` columns.
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Applies a signed offset, returning `None` if either axis would go negative.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coord> {
        Some(Coord {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Snapshot of a single grid cell.
///
/// `blocked` and `reward` are fixed at construction; `value` is the current
/// estimate maintained by the algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub blocked: bool,
    pub reward: f64,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_row_major() {
        let c = Coord::new(3, 7);
        assert_eq!(c.index(10), 37);
        assert_eq!(Coord::from_index(37, 10), c);
    }

    #[test]
    fn in_bounds_checks_both_axes() {
        assert!(Coord::new(9, 9).in_bounds(10, 10));
        assert!(!Coord::new(10, 0).in_bounds(10, 10));
        assert!(!Coord::new(0, 10).in_bounds(10, 10));
    }

    #[test]
    fn offset_rejects_negative() {
        assert_eq!(Coord::origin().offset(-1, 0), None);
        assert_eq!(Coord::origin().offset(0, 1), Some(Coord::new(0, 1)));
    }

    #[test]
    fn display_format() {
        assert_eq!(Coord::new(5, 5).to_string(), "(5, 5)");
    }
}
