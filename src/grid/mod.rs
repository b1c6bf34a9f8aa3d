//! Grid environment model.

pub mod transition;
pub mod types;
pub mod world;

pub use transition::{Action, Successors, TransitionModel};
pub use types::{Cell, Coord, NEGATIVE_REWARD, POSITIVE_REWARD};
pub use world::GridWorld;
