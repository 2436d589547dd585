//! Row-major flat grid of cell states. No per-cell objects.
//! Out-of-range addressing is delegated to an injected [`EdgePolicy`].

use rand::Rng;
use tracing::{debug, trace};

use crate::edge::{EdgePolicy, Topology, moore_neighbors};
use crate::engine;
use crate::error::{LifeError, Result};
use crate::pattern;
use crate::snapshot::{Dims, Snapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<P = Topology> {
    cells: Vec<bool>,
    dims: Dims,
    policy: P,
    generation: u64,
}

impl<P: EdgePolicy + Default> Default for Grid<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: EdgePolicy> Grid<P> {
    /// Zero-sized grid. Call [`Grid::set_size`] before use.
    pub fn new(policy: P) -> Self {
        Self {
            cells: Vec::new(),
            dims: Dims::default(),
            policy,
            generation: 0,
        }
    }

    pub fn with_size(width: usize, height: usize, policy: P) -> Result<Self> {
        let mut grid = Self::new(policy);
        grid.set_size(width, height)?;
        Ok(grid)
    }

    pub fn from_snapshot(snapshot: Snapshot, policy: P) -> Self {
        let dims = snapshot.dims();
        Self {
            cells: snapshot.into_cells(),
            dims,
            policy,
            generation: 0,
        }
    }

    /// Grid exactly the size of a literal pattern.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R], policy: P) -> Result<Self> {
        let dims = pattern::pattern_dims(rows)?;
        Ok(Self {
            cells: pattern::from_pattern(rows),
            dims,
            policy,
            generation: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn policy(&self) -> P {
        self.policy
    }

    /// Generations evolved since creation or the last resize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[inline]
    fn resolve(&self, x: i64, y: i64) -> Option<usize> {
        self.policy
            .resolve(x, y, self.dims.width, self.dims.height)
            .map(|(x, y)| self.dims.index(x, y))
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> LifeError {
        LifeError::OutOfBounds {
            x,
            y,
            width: self.dims.width,
            height: self.dims.height,
        }
    }

    /// Reallocate to `width * height` cells. Cells inside both the old and the
    /// new bounds keep their state, new cells are dead, the rest are dropped.
    /// Resets the generation counter.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<()> {
        let dims = Dims::new(width, height);
        let mut cells = vec![false; dims.checked_area()?];

        let keep_w = width.min(self.dims.width);
        let keep_h = height.min(self.dims.height);
        if keep_w > 0 {
            for y in 0..keep_h {
                let src = self.dims.index(0, y);
                let dst = dims.index(0, y);
                cells[dst..dst + keep_w].copy_from_slice(&self.cells[src..src + keep_w]);
            }
        }

        debug!(
            from_w = self.dims.width,
            from_h = self.dims.height,
            width,
            height,
            "grid resized"
        );
        self.cells = cells;
        self.dims = dims;
        self.generation = 0;
        Ok(())
    }

    /// `None` when the policy finds no cell at `(x, y)`.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<bool> {
        self.resolve(x, y).map(|i| self.cells[i])
    }

    /// Writes exactly one cell. Never grows storage: an address the policy
    /// cannot resolve is an `OutOfBounds` error.
    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) -> Result<()> {
        let i = self.resolve(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Flip one cell and return its new state.
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<bool> {
        let i = self.resolve(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    /// Raw Moore neighbourhood in the fixed offset order, absent cells as `None`.
    pub fn neighbor_states(&self, x: i64, y: i64) -> [Option<bool>; 8] {
        moore_neighbors(self.policy, x, y, self.dims.width, self.dims.height)
            .map(|pos| pos.map(|(nx, ny)| self.cells[self.dims.index(nx, ny)]))
    }

    /// Present neighbours only. A bounded corner yields 3, a wrapped cell 8.
    pub fn neighbors(&self, x: i64, y: i64) -> Vec<bool> {
        self.neighbor_states(x, y).into_iter().flatten().collect()
    }

    pub fn living_neighbors(&self, x: i64, y: i64) -> usize {
        self.neighbor_states(x, y)
            .into_iter()
            .filter(|s| *s == Some(true))
            .count()
    }

    /// Rows of columns.
    pub fn state(&self) -> Vec<Vec<bool>> {
        if self.dims.width == 0 {
            return vec![Vec::new(); self.dims.height];
        }
        self.cells
            .chunks(self.dims.width)
            .map(<[bool]>::to_vec)
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_parts(self.cells.clone(), self.dims)
    }

    /// Advance one generation, counting neighbours under this grid's policy.
    pub fn evolve(&mut self) {
        self.cells = engine::step(&self.cells, self.dims, self.policy);
        self.generation += 1;
        trace!(generation = self.generation, population = self.population(), "evolved");
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Clear, then bring each cell alive with probability `density`.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::invalid_config(format!(
                "density {density} is outside [0, 1]"
            )));
        }
        for cell in &mut self.cells {
            *cell = rng.gen_bool(density);
        }
        debug!(density, population = self.population(), "grid populated");
        Ok(())
    }

    /// Copy a literal pattern with its top-left corner at `(x, y)`, writing
    /// both live and dead cells. Nothing is written unless every cell resolves.
    pub fn stamp<R: AsRef<[bool]>>(&mut self, rows: &[R], x: i64, y: i64) -> Result<()> {
        let pd = pattern::pattern_dims(rows)?;
        let mut writes = Vec::with_capacity(pd.area());
        for (py, row) in rows.iter().enumerate() {
            for (px, &alive) in row.as_ref().iter().enumerate() {
                let i = x
                    .checked_add(px as i64)
                    .zip(y.checked_add(py as i64))
                    .and_then(|(cx, cy)| self.resolve(cx, cy))
                    .ok_or_else(|| LifeError::PatternDoesNotFit {
                        x,
                        y,
                        pattern_width: pd.width,
                        pattern_height: pd.height,
                        width: self.dims.width,
                        height: self.dims.height,
                    })?;
                writes.push((i, alive));
            }
        }
        for (i, alive) in writes {
            self.cells[i] = alive;
        }
        Ok(())
    }
}
