//! Measures of how much the value estimates moved between two sweeps.

use crate::grid::GridWorld;

/// How the change between the previous and the current sweep is measured.
///
/// [`ConvergenceMetric::SignedSum`] is the default. It adds signed
/// differences before taking the absolute value, so an increase in one cell
/// can cancel a decrease in another and report convergence early. The two
/// absolute metrics do not have that problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceMetric {
    /// `|Σ (new - old)|`
    #[default]
    SignedSum,
    /// `Σ |new - old|`
    AbsoluteSum,
    /// `max |new - old|`
    MaxAbsolute,
}

impl ConvergenceMetric {
    /// Computes the metric over two equally sized row-major value buffers.
    pub fn measure(&self, previous: &[f64], current: &[f64]) -> f64 {
        debug_assert_eq!(previous.len(), current.len());
        let deltas = previous.iter().zip(current).map(|(old, new)| new - old);
        match self {
            ConvergenceMetric::SignedSum => deltas.sum::<f64>().abs(),
            ConvergenceMetric::AbsoluteSum => deltas.map(f64::abs).sum(),
            ConvergenceMetric::MaxAbsolute => deltas.map(f64::abs).fold(0.0, f64::max),
        }
    }

    /// Computes the metric between two grids of the same shape.
    pub fn between(&self, previous: &GridWorld, current: &GridWorld) -> f64 {
        self.measure(previous.values(), current.values())
    }
}

/// Default (signed-sum) change between a snapshot and the current grid.
pub fn diff(previous: &GridWorld, current: &GridWorld) -> f64 {
    ConvergenceMetric::SignedSum.between(previous, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;

    #[test]
    fn signed_sum_masks_opposite_changes() {
        let mut grid = GridWorld::new(3, 3, &[], &[], &[]).unwrap();
        let previous = grid.snapshot();
        let d = 0.75;
        grid.set(Coord::new(0, 0), d).unwrap();
        grid.set(Coord::new(2, 1), -d).unwrap();

        assert_eq!(diff(&previous, &grid), 0.0);
        assert_eq!(ConvergenceMetric::AbsoluteSum.between(&previous, &grid), 2.0 * d);
        assert_eq!(ConvergenceMetric::MaxAbsolute.between(&previous, &grid), d);
    }

    #[test]
    fn identical_buffers_measure_zero() {
        let v = [0.3, -1.2, 4.0];
        for metric in [
            ConvergenceMetric::SignedSum,
            ConvergenceMetric::AbsoluteSum,
            ConvergenceMetric::MaxAbsolute,
        ] {
            assert_eq!(metric.measure(&v, &v), 0.0);
        }
    }

    #[test]
    fn same_direction_changes_accumulate() {
        let old = [0.0, 0.0, 0.0];
        let new = [0.5, 0.25, -0.125];
        assert_eq!(ConvergenceMetric::SignedSum.measure(&old, &new), 0.625);
        assert_eq!(ConvergenceMetric::AbsoluteSum.measure(&old, &new), 0.875);
        assert_eq!(ConvergenceMetric::MaxAbsolute.measure(&old, &new), 0.5);
    }
}
