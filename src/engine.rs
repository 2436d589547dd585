//! Stateless B3/S23 evolution over flat row-major cell slices.
//!
//! Every entry point takes a snapshot and returns a freshly allocated next
//! generation; inputs are never mutated. [`evolve`] always counts neighbours
//! with the [`Bounded`] policy (finite world). [`evolve_with`] applies the same
//! rule table under any [`EdgePolicy`], which is how a toroidal grid steps.

use crate::edge::{Bounded, EdgePolicy, MOORE};
use crate::error::Result;
use crate::snapshot::Dims;

/// The rule table for one cell.
#[inline]
pub fn next_state(alive: bool, living: usize) -> bool {
    match (alive, living) {
        (true, 2) | (true, 3) => true, // survival
        (false, 3) => true,            // birth
        _ => false,
    }
}

/// Live cells among the Moore neighbours of `(x, y)` under `policy`.
#[inline]
pub fn living_neighbors<P: EdgePolicy>(cells: &[bool], dims: Dims, x: usize, y: usize, policy: P) -> usize {
    let (x, y) = (x as i64, y as i64);
    MOORE
        .iter()
        .filter_map(|&(dx, dy)| policy.resolve(x + dx, y + dy, dims.width, dims.height))
        .filter(|&(nx, ny)| cells[dims.index(nx, ny)])
        .count()
}

/// One generation. Caller guarantees `cells.len() == dims.area()`.
pub(crate) fn step<P: EdgePolicy>(cells: &[bool], dims: Dims, policy: P) -> Vec<bool> {
    debug_assert_eq!(cells.len(), dims.area());
    let mut next = Vec::with_capacity(cells.len());
    for y in 0..dims.height {
        for x in 0..dims.width {
            let living = living_neighbors(cells, dims, x, y, policy);
            next.push(next_state(cells[dims.index(x, y)], living));
        }
    }
    next
}

/// Next generation of a finite world.
///
/// Fails with `SnapshotMismatch` when `cells` does not exactly fill `dims`;
/// a silent mismatch would shift every row of the neighbour lookup.
pub fn evolve(cells: &[bool], dims: Dims) -> Result<Vec<bool>> {
    evolve_with(cells, dims, Bounded)
}

/// Next generation with neighbour counts taken under `policy`.
pub fn evolve_with<P: EdgePolicy>(cells: &[bool], dims: Dims, policy: P) -> Result<Vec<bool>> {
    dims.check_len(cells.len())?;
    Ok(step(cells, dims, policy))
}

/// `generations` successive finite-world steps. Zero returns a copy of the input.
pub fn evolve_n(cells: &[bool], dims: Dims, generations: usize) -> Result<Vec<bool>> {
    dims.check_len(cells.len())?;
    let mut cur = cells.to_vec();
    for _ in 0..generations {
        cur = step(&cur, dims, Bounded);
    }
    Ok(cur)
}

/// In-bounds coordinates within Chebyshev distance `d` of `(x, y)` on a
/// `w` x `h` field, centre excluded. Row-major: `dy` outer, `dx` inner.
pub fn cell_neighbors(x: usize, y: usize, w: usize, h: usize, d: usize) -> Vec<(usize, usize)> {
    if x >= w || y >= h {
        return Vec::new();
    }
    let (x0, x1) = (x.saturating_sub(d), x.saturating_add(d).min(w - 1));
    let (y0, y1) = (y.saturating_sub(d), y.saturating_add(d).min(h - 1));

    let mut out = Vec::with_capacity((x1 - x0 + 1) * (y1 - y0 + 1) - 1);
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            if (nx, ny) != (x, y) {
                out.push((nx, ny));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Wrapped;
    use crate::error::LifeError;

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = evolve(&[false; 8], Dims::new(3, 3)).unwrap_err();
        assert!(matches!(
            err,
            LifeError::SnapshotMismatch {
                expected: 9,
                actual: 8
            }
        ));
        assert!(evolve_n(&[true; 10], Dims::new(3, 3), 2).is_err());
    }

    #[test]
    fn empty_world_evolves_to_empty() {
        assert_eq!(evolve(&[], Dims::new(0, 0)).unwrap(), Vec::<bool>::new());
        assert_eq!(evolve(&[], Dims::new(0, 7)).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn lone_cell_dies() {
        let mut cells = vec![false; 9];
        cells[4] = true;
        assert_eq!(evolve(&cells, Dims::new(3, 3)).unwrap(), vec![false; 9]);
    }

    #[test]
    fn edge_blinker_differs_between_policies() {
        // Horizontal blinker on the top row of a 3x3 field.
        let cells = [true, true, true, false, false, false, false, false, false];
        let dims = Dims::new(3, 3);

        let bounded = evolve(&cells, dims).unwrap();
        assert_eq!(
            bounded,
            vec![false, true, false, false, true, false, false, false, false]
        );

        // On a 3x3 torus the other eight cells are all neighbours: the live row
        // survives with 2 and every dead cell is born with 3.
        let wrapped = evolve_with(&cells, dims, Wrapped).unwrap();
        assert_eq!(wrapped, vec![true; 9]);
    }

    #[test]
    fn evolve_n_zero_is_identity() {
        let cells = [true, false, true, false];
        assert_eq!(evolve_n(&cells, Dims::new(2, 2), 0).unwrap(), cells.to_vec());
    }

    #[test]
    fn neighbors_of_corners_and_centre() {
        assert_eq!(cell_neighbors(0, 0, 3, 3, 1), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(
            cell_neighbors(1, 1, 3, 3, 1),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
        assert_eq!(cell_neighbors(2, 2, 3, 3, 1), vec![(1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn opposite_corners_reflect() {
        let (w, h) = (5, 4);
        let mut near: Vec<_> = cell_neighbors(0, 0, w, h, 2);
        let mut far: Vec<_> = cell_neighbors(w - 1, h - 1, w, h, 2)
            .into_iter()
            .map(|(x, y)| (w - 1 - x, h - 1 - y))
            .collect();
        near.sort_unstable();
        far.sort_unstable();
        assert_eq!(near, far);
    }

    #[test]
    fn neighbors_degenerate_inputs() {
        assert!(cell_neighbors(3, 0, 3, 3, 1).is_empty());
        assert!(cell_neighbors(1, 1, 3, 3, 0).is_empty());
        assert!(cell_neighbors(0, 0, 1, 1, 1).is_empty());
        assert_eq!(cell_neighbors(2, 2, 5, 5, 2).len(), 24);
    }
}
