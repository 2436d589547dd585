use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;

/// Moore neighbourhood offsets, top row first, left to right.
pub const MOORE: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Resolves a raw `(x, y)` into an in-range coordinate of a `w` x `h` field.
/// `None` means "no cell there".
pub trait EdgePolicy: Copy + fmt::Debug {
    fn resolve(&self, x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)>;

    /// Equivalent address of `(x, y)` from which offsets are taken.
    /// Identity unless the policy identifies distant coordinates.
    #[inline]
    fn anchor(&self, x: i64, y: i64, _w: usize, _h: usize) -> (i64, i64) {
        (x, y)
    }
}

/// Finite world: anything outside `[0, w) x [0, h)` is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounded;

/// Toroidal world: both axes wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wrapped;

impl EdgePolicy for Bounded {
    #[inline]
    fn resolve(&self, x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < w)?;
        let y = usize::try_from(y).ok().filter(|&y| y < h)?;
        Some((x, y))
    }
}

impl EdgePolicy for Wrapped {
    #[inline]
    fn resolve(&self, x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)> {
        if w == 0 || h == 0 {
            return None; // nothing to wrap onto
        }
        Some((wrap_axis(x, w), wrap_axis(y, h)))
    }

    #[inline]
    fn anchor(&self, x: i64, y: i64, w: usize, h: usize) -> (i64, i64) {
        match self.resolve(x, y, w, h) {
            Some((x, y)) => (x as i64, y as i64),
            None => (x, y),
        }
    }
}

/// Modulo that maps negative values into `[0, m)`.
#[inline]
pub fn wrap_axis(n: i64, m: usize) -> usize {
    let m = m as i64;
    (((n % m) + m) % m) as usize
}

/// Runtime choice between the two policies, for config files and requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Bounded,
    Wrapped,
}

impl EdgePolicy for Topology {
    #[inline]
    fn resolve(&self, x: i64, y: i64, w: usize, h: usize) -> Option<(usize, usize)> {
        match self {
            Topology::Bounded => Bounded.resolve(x, y, w, h),
            Topology::Wrapped => Wrapped.resolve(x, y, w, h),
        }
    }

    #[inline]
    fn anchor(&self, x: i64, y: i64, w: usize, h: usize) -> (i64, i64) {
        match self {
            Topology::Bounded => Bounded.anchor(x, y, w, h),
            Topology::Wrapped => Wrapped.anchor(x, y, w, h),
        }
    }
}

impl From<Bounded> for Topology {
    fn from(_: Bounded) -> Self {
        Topology::Bounded
    }
}

impl From<Wrapped> for Topology {
    fn from(_: Wrapped) -> Self {
        Topology::Wrapped
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Bounded => "bounded",
            Topology::Wrapped => "wrapped",
        })
    }
}

impl FromStr for Topology {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" | "clamped" => Ok(Topology::Bounded),
            "wrapped" | "toroidal" | "torus" => Ok(Topology::Wrapped),
            other => Err(LifeError::invalid_config(format!(
                "unknown topology '{other}' (expected bounded or wrapped)"
            ))),
        }
    }
}

/// The 8 Moore neighbours of `(x, y)` resolved through `policy`, in [`MOORE`] order.
/// Offsets that overflow `i64` from the anchored centre are absent.
pub fn moore_neighbors<P: EdgePolicy>(
    policy: P,
    x: i64,
    y: i64,
    w: usize,
    h: usize,
) -> [Option<(usize, usize)>; 8] {
    let (x, y) = policy.anchor(x, y, w, h);
    MOORE.map(|(dx, dy)| {
        let (nx, ny) = (x.checked_add(dx)?, y.checked_add(dy)?);
        policy.resolve(nx, ny, w, h)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_rejects_outside() {
        assert_eq!(Bounded.resolve(0, 0, 3, 3), Some((0, 0)));
        assert_eq!(Bounded.resolve(2, 2, 3, 3), Some((2, 2)));
        assert_eq!(Bounded.resolve(-1, 0, 3, 3), None);
        assert_eq!(Bounded.resolve(0, 3, 3, 3), None);
        assert_eq!(Bounded.resolve(0, 0, 0, 0), None);
    }

    #[test]
    fn wrapped_maps_negatives_into_range() {
        assert_eq!(wrap_axis(-1, 10), 9);
        assert_eq!(wrap_axis(-11, 10), 9);
        assert_eq!(wrap_axis(10, 10), 0);
        assert_eq!(Wrapped.resolve(-1, -1, 10, 10), Some((9, 9)));
        assert_eq!(Wrapped.resolve(10, 3, 10, 10), Some((0, 3)));
    }

    #[test]
    fn wrapped_empty_field_has_no_cells() {
        assert_eq!(Wrapped.resolve(0, 0, 0, 5), None);
        assert_eq!(Wrapped.resolve(0, 0, 5, 0), None);
    }

    #[test]
    fn corner_neighbourhoods() {
        let bounded = moore_neighbors(Bounded, 0, 0, 10, 10);
        assert_eq!(bounded.iter().flatten().count(), 3);
        assert_eq!(bounded[4], Some((1, 0)));
        assert_eq!(bounded[6], Some((0, 1)));
        assert_eq!(bounded[7], Some((1, 1)));

        let wrapped = moore_neighbors(Wrapped, 9, 9, 10, 10);
        assert_eq!(wrapped.iter().flatten().count(), 8);
        assert_eq!(wrapped[7], Some((0, 0)));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        // i64::MAX wraps to column 3 of a 4-wide field.
        let n = moore_neighbors(Wrapped, i64::MAX, 0, 4, 4);
        assert_eq!(n, moore_neighbors(Wrapped, 3, 0, 4, 4));
        assert_eq!(n.iter().flatten().count(), 8);
        let n = moore_neighbors(Topology::Wrapped, i64::MIN, i64::MIN, 4, 4);
        assert_eq!(n.iter().flatten().count(), 8);
        assert!(moore_neighbors(Bounded, i64::MIN, 0, 4, 4).iter().all(Option::is_none));
    }

    #[test]
    fn topology_dispatches_and_parses() {
        assert_eq!(Topology::Bounded.resolve(-1, 0, 4, 4), None);
        assert_eq!(Topology::Wrapped.resolve(-1, 0, 4, 4), Some((3, 0)));
        assert_eq!("Torus".parse::<Topology>().unwrap(), Topology::Wrapped);
        assert_eq!("bounded".parse::<Topology>().unwrap(), Topology::Bounded);
        assert!("hexagonal".parse::<Topology>().is_err());
        assert_eq!(Topology::Wrapped.to_string(), "wrapped");
    }
}
