//! Online temporal-difference learning.

pub mod exploration;
pub mod walker;

pub use exploration::{choose_target, neighbor_index, TargetChoice};
pub use walker::{TemporalDifferenceWalker, WalkStep, WalkSummary};
