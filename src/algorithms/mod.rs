pub mod evaluation;
pub mod td;

pub use evaluation::{ConvergenceMetric, PolicyEvaluator};
pub use td::TemporalDifferenceWalker;

use crate::grid::GridWorld;
use crate::view::GridView;

/// An algorithm that owns a [`GridWorld`] and refines its values one unit at a time.
///
/// A unit is a full sweep for [`PolicyEvaluator`] and a single agent step for
/// [`TemporalDifferenceWalker`]. Drivers call [`ValueAlgorithm::advance`] until
/// [`ValueAlgorithm::is_done`] and hand [`ValueAlgorithm::view`] snapshots to
/// whatever renders them.
pub trait ValueAlgorithm {
    /// Per-unit report returned by [`ValueAlgorithm::advance`].
    type Report;

    /// Advances the algorithm by one unit.
    fn advance(&mut self) -> Self::Report;

    /// Returns true once the algorithm should not be advanced any further.
    fn is_done(&self) -> bool;

    /// Number of units completed so far.
    fn iterations(&self) -> usize;

    /// Read access to the owned grid.
    fn grid(&self) -> &GridWorld;

    /// Copy-on-read snapshot for renderers.
    fn view(&self) -> GridView;

    /// Short name for logs.
    fn name(&self) -> &str;
}
