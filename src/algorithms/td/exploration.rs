//! Target selection for the online walker.

use rand::Rng;

use crate::grid::Coord;

/// The cell the walker attempts to move to on one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetChoice {
    pub coord: Coord,
    /// True when the target came from the epsilon branch (uniform over the whole grid).
    pub explored: bool,
}

/// Index into a neighbor list of length `count`, drawn from `[0, count - 1)`.
///
/// The last neighbor is never drawn. With fewer than two neighbors the range
/// is empty and index 0 is used.
pub fn neighbor_index<R: Rng + ?Sized>(rng: &mut R, count: usize) -> usize {
    if count < 2 {
        0
    } else {
        rng.gen_range(0..count - 1)
    }
}

/// Chooses the next target from `position`.
///
/// The neighbor index is drawn first, then the epsilon roll; when the roll
/// succeeds the walker teleports to a uniformly random cell anywhere on the
/// `rows × cols` board. A cell with no neighbors targets itself.
pub fn choose_target<R: Rng + ?Sized>(
    rng: &mut R,
    position: Coord,
    neighbors: &[Coord],
    rows: usize,
    cols: usize,
    epsilon: f64,
) -> TargetChoice {
    let index = neighbor_index(rng, neighbors.len());

    if rng.gen::<f64>() < epsilon {
        let coord = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        return TargetChoice {
            coord,
            explored: true,
        };
    }

    TargetChoice {
        coord: neighbors.get(index).copied().unwrap_or(position),
        explored: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn short_lists_use_first_neighbor() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(neighbor_index(&mut rng, 0), 0);
        assert_eq!(neighbor_index(&mut rng, 1), 0);
        for _ in 0..50 {
            assert_eq!(neighbor_index(&mut rng, 2), 0);
        }
    }

    #[test]
    fn last_neighbor_is_never_drawn() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[neighbor_index(&mut rng, 4)] = true;
        }
        assert_eq!(seen, [true, true, true, false]);
    }

    #[test]
    fn zero_epsilon_never_teleports() {
        let mut rng = StdRng::seed_from_u64(3);
        let neighbors = [Coord::new(3, 4), Coord::new(5, 4), Coord::new(4, 3)];
        for _ in 0..500 {
            let choice = choose_target(&mut rng, Coord::new(4, 4), &neighbors, 10, 10, 0.0);
            assert!(!choice.explored);
            assert!(neighbors[..2].contains(&choice.coord));
        }
    }

    #[test]
    fn full_epsilon_always_teleports_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let neighbors = [Coord::new(1, 0), Coord::new(0, 1)];
        for _ in 0..500 {
            let choice = choose_target(&mut rng, Coord::origin(), &neighbors, 6, 3, 1.0);
            assert!(choice.explored);
            assert!(choice.coord.in_bounds(6, 3));
        }
    }

    #[test]
    fn isolated_cell_targets_itself() {
        let mut rng = StdRng::seed_from_u64(5);
        let choice = choose_target(&mut rng, Coord::origin(), &[], 1, 1, 0.0);
        assert_eq!(choice.coord, Coord::origin());
    }
}
