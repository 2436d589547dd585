use serde::{Deserialize, Serialize};

use crate::edge::Bounded;
use crate::engine;
use crate::error::{LifeError, Result};

/// Explicit world dimensions. Shape is never inferred from storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
}

impl Dims {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells, or `DimensionsOverflow` if it does not fit a `usize`.
    pub fn checked_area(&self) -> Result<usize> {
        self.width
            .checked_mul(self.height)
            .ok_or(LifeError::DimensionsOverflow {
                width: self.width,
                height: self.height,
            })
    }

    /// Number of cells. Only valid for dimensions that already back storage.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index. The one place `y * width + x` is computed.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails unless `len` cells exactly fill these dimensions.
    pub fn check_len(&self, len: usize) -> Result<()> {
        let expected = self.checked_area()?;
        if len != expected {
            return Err(LifeError::SnapshotMismatch {
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

/// One generation: immutable flat cells plus their dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    dims: Dims,
    cells: Vec<bool>,
}

impl Snapshot {
    pub fn new(cells: Vec<bool>, dims: Dims) -> Result<Self> {
        dims.check_len(cells.len())?;
        Ok(Self { dims, cells })
    }

    /// Storage whose length is already known to match `dims`.
    pub(crate) fn from_parts(cells: Vec<bool>, dims: Dims) -> Self {
        debug_assert_eq!(cells.len(), dims.area());
        Self { dims, cells }
    }

    /// All-dead snapshot.
    pub fn dead(dims: Dims) -> Result<Self> {
        let n = dims.checked_area()?;
        Ok(Self {
            dims,
            cells: vec![false; n],
        })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<bool> {
        self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.dims.width && y < self.dims.height).then(|| self.cells[self.dims.index(x, y)])
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Rows of columns.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        if self.dims.width == 0 {
            return vec![Vec::new(); self.dims.height];
        }
        self.cells
            .chunks(self.dims.width)
            .map(<[bool]>::to_vec)
            .collect()
    }

    /// Next generation under the bounded rule.
    pub fn evolve(&self) -> Snapshot {
        Snapshot {
            dims: self.dims,
            cells: engine::step(&self.cells, self.dims, Bounded),
        }
    }
}
