//! Literal patterns and their flattening into engine input.
//!
//! Reference patterns are transcribed from the LifeWiki catalogue. Each frame
//! is surrounded by dead cells, so a pattern evolves inside a grid exactly its
//! own size the same way it would on an infinite plane.

use serde::Serialize;

use crate::error::{LifeError, Result};
use crate::snapshot::Dims;

/// Row-major concatenation of `rows`. No padding or size adjustment.
pub fn from_pattern<R: AsRef<[bool]>>(rows: &[R]) -> Vec<bool> {
    rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect()
}

/// `{ width: rows[0].len(), height: rows.len() }`, rejecting ragged rows.
pub fn pattern_dims<R: AsRef<[bool]>>(rows: &[R]) -> Result<Dims> {
    let width = rows.first().map_or(0, |r| r.as_ref().len());
    for (row, r) in rows.iter().enumerate() {
        let actual = r.as_ref().len();
        if actual != width {
            return Err(LifeError::RaggedPattern {
                row,
                expected: width,
                actual,
            });
        }
    }
    Ok(Dims::new(width, rows.len()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Fixed point of evolution.
    StillLife,
    /// Returns to its first frame after `period` generations.
    Oscillator,
    /// Returns to its first frame after `period` generations, translated.
    Spaceship,
}

type Frame = &'static [&'static [bool]];

#[derive(Debug, Serialize)]
pub struct Pattern {
    pub name: &'static str,
    pub family: Family,
    /// One frame per generation of the period.
    pub frames: &'static [Frame],
    /// Translation after one full period, y pointing down.
    pub displacement: (i64, i64),
}

impl Pattern {
    pub fn by_name(name: &str) -> Result<&'static Pattern> {
        CATALOG
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        CATALOG.iter().map(|p| p.name)
    }

    pub fn period(&self) -> usize {
        self.frames.len()
    }

    /// Dimensions of every frame.
    pub fn dims(&self) -> Dims {
        Dims::new(self.frames[0][0].len(), self.frames[0].len())
    }

    /// Frame `i` (modulo the period) as rows of columns.
    pub fn rows(&self, i: usize) -> Vec<Vec<bool>> {
        self.frame(i).iter().map(|r| r.to_vec()).collect()
    }

    /// Frame `i` (modulo the period), flattened.
    pub fn cells(&self, i: usize) -> Vec<bool> {
        from_pattern(self.frame(i))
    }

    fn frame(&self, i: usize) -> Frame {
        self.frames[i % self.frames.len()]
    }
}

const T: bool = true;
const F: bool = false;

pub const BLOCK: Pattern = Pattern {
    name: "block",
    family: Family::StillLife,
    frames: &[&[
        &[T, T],
        &[T, T],
    ]],
    displacement: (0, 0),
};

pub const BEEHIVE: Pattern = Pattern {
    name: "beehive",
    family: Family::StillLife,
    frames: &[&[
        &[F, T, T, F],
        &[T, F, F, T],
        &[F, T, T, F],
    ]],
    displacement: (0, 0),
};

pub const LOAF: Pattern = Pattern {
    name: "loaf",
    family: Family::StillLife,
    frames: &[&[
        &[F, T, T, F],
        &[T, F, F, T],
        &[F, T, F, T],
        &[F, F, T, F],
    ]],
    displacement: (0, 0),
};

pub const BOAT: Pattern = Pattern {
    name: "boat",
    family: Family::StillLife,
    frames: &[&[
        &[T, T, F],
        &[T, F, T],
        &[F, T, F],
    ]],
    displacement: (0, 0),
};

pub const TUB: Pattern = Pattern {
    name: "tub",
    family: Family::StillLife,
    frames: &[&[
        &[F, T, F],
        &[T, F, T],
        &[F, T, F],
    ]],
    displacement: (0, 0),
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    family: Family::Oscillator,
    frames: &[
        &[
            &[F, T, F],
            &[F, T, F],
            &[F, T, F],
        ],
        &[
            &[F, F, F],
            &[T, T, T],
            &[F, F, F],
        ],
    ],
    displacement: (0, 0),
};

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    family: Family::Spaceship,
    frames: &[
        &[
            &[F, F, T, F],
            &[T, F, T, F],
            &[F, T, T, F],
            &[F, F, F, F],
        ],
        &[
            &[F, T, F, F],
            &[F, F, T, T],
            &[F, T, T, F],
            &[F, F, F, F],
        ],
        &[
            &[F, F, T, F],
            &[F, F, F, T],
            &[F, T, T, T],
            &[F, F, F, F],
        ],
        &[
            &[F, F, F, F],
            &[F, T, F, T],
            &[F, F, T, T],
            &[F, F, T, F],
        ],
    ],
    displacement: (1, 1),
};

pub const CATALOG: &[Pattern] = &[BLOCK, BEEHIVE, LOAF, BOAT, TUB, BLINKER, GLIDER];
