pub mod config;
pub mod edge;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod render;
pub mod rng;
pub mod snapshot;

use std::time::Instant;

use tracing::info;

use config::Params;
use edge::Topology;
use grid::Grid;
use pattern::Pattern;
use rng::SplitMix64;
use snapshot::{Dims, Snapshot};

pub use edge::{Bounded, EdgePolicy, Wrapped};
pub use error::{LifeError, Result};

/// Every generation of one simulation, the seeded world first.
pub struct Run {
    pub dims: Dims,
    pub topology: Topology,
    pub frames: Vec<Snapshot>,
}

impl Run {
    pub fn populations(&self) -> Vec<usize> {
        self.frames.iter().map(Snapshot::population).collect()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build the starting world: the named pattern centred, or random cells
/// drawn from a generator seeded with `params.seed`.
pub fn seed_grid(params: &Params) -> Result<Grid> {
    let mut grid = Grid::with_size(params.width, params.height, params.topology)?;
    match &params.pattern {
        Some(name) => {
            let p = Pattern::by_name(name)?;
            let pd = p.dims();
            let x = params.width.saturating_sub(pd.width) / 2;
            let y = params.height.saturating_sub(pd.height) / 2;
            grid.stamp(p.frames[0], x as i64, y as i64)?;
        }
        None => {
            let mut rng = SplitMix64::new(params.seed);
            grid.populate(&mut rng, params.density)?;
        }
    }
    Ok(grid)
}

/// Evolve `grid` for `generations` steps, keeping every frame.
pub fn run_grid(mut grid: Grid, generations: usize) -> Run {
    let mut frames = Vec::with_capacity(generations + 1);
    frames.push(grid.snapshot());
    for _ in 0..generations {
        grid.evolve();
        frames.push(grid.snapshot());
    }
    Run {
        dims: grid.dims(),
        topology: grid.policy(),
        frames,
    }
}

pub fn simulate(params: &Params) -> Result<(Run, Vec<Timing>)> {
    params.validate()?;
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Seed
    let t = Instant::now();
    let grid = seed_grid(params)?;
    timings.push(Timing {
        name: "seed",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Evolve
    let t = Instant::now();
    let run = run_grid(grid, params.generations);
    timings.push(Timing {
        name: "evolve",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    info!(
        width = params.width,
        height = params.height,
        topology = %params.topology,
        generations = params.generations,
        final_population = run.last().map_or(0, Snapshot::population),
        "simulation finished"
    );

    Ok((run, timings))
}
