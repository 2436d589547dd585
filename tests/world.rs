use lifeworld::engine::{cell_neighbors, evolve, evolve_n};
use lifeworld::grid::Grid;
use lifeworld::pattern::{self, BLINKER, BLOCK, CATALOG, Family, GLIDER};
use lifeworld::snapshot::Dims;
use lifeworld::{Bounded, Wrapped};

fn dims_of(rows: &[&[bool]]) -> Dims {
    Dims::new(rows[0].len(), rows.len())
}

/// `rows` copied into a larger dead world with its top-left corner at `(ox, oy)`.
fn embed(rows: &[&[bool]], dims: Dims, ox: usize, oy: usize) -> Vec<bool> {
    let mut cells = vec![false; dims.area()];
    for (y, row) in rows.iter().enumerate() {
        for (x, &alive) in row.iter().enumerate() {
            cells[dims.index(ox + x, oy + y)] = alive;
        }
    }
    cells
}

#[test]
fn cell_neighbors_fixed_world() {
    let mut w = Grid::new(Bounded);
    w.set_size(10, 10).unwrap();
    w.set_cell(0, 0, true).unwrap();

    assert_eq!(w.neighbors(0, 0), vec![false, false, false]);
    assert_eq!(w.neighbors(9, 9), vec![false, false, false]);
    assert_eq!(w.neighbors(4, 4), vec![false; 8]);
}

#[test]
fn cell_neighbors_wrapped_world() {
    let mut w = Grid::new(Wrapped);
    w.set_size(10, 10).unwrap();
    w.set_cell(0, 0, true).unwrap();

    assert_eq!(w.neighbors(0, 0), vec![false; 8]);
    assert_eq!(
        w.neighbors(9, 9),
        vec![false, false, false, false, false, false, false, true]
    );
    assert_eq!(w.neighbors(4, 4), vec![false; 8]);
}

#[test]
fn neighbor_algorithm() {
    assert_eq!(cell_neighbors(0, 0, 3, 3, 1), vec![(1, 0), (0, 1), (1, 1)]);
    assert_eq!(
        cell_neighbors(1, 1, 3, 3, 1),
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
    );
    assert_eq!(cell_neighbors(2, 2, 3, 3, 1), vec![(1, 1), (2, 1), (1, 2)]);
}

#[test]
fn still_life_block() {
    let rows = BLOCK.frames[0];
    let w = pattern::from_pattern(rows);
    assert_eq!(w, vec![true; 4]);
    assert_eq!(evolve(&w, dims_of(rows)).unwrap(), w);
}

#[test]
fn every_still_life_is_a_fixed_point() {
    for p in CATALOG.iter().filter(|p| p.family == Family::StillLife) {
        let cells = p.cells(0);
        assert_eq!(evolve(&cells, p.dims()).unwrap(), cells, "{}", p.name);
        assert_eq!(evolve_n(&cells, p.dims(), 10).unwrap(), cells, "{}", p.name);
    }
}

#[test]
fn oscillator_blinker() {
    let dims = BLINKER.dims();
    let w = BLINKER.cells(0);
    let step1 = evolve(&w, dims).unwrap();
    assert_eq!(step1, BLINKER.cells(1));
    let step2 = evolve(&step1, dims).unwrap();
    assert_eq!(step2, w);
}

#[test]
fn glider_translates_each_period() {
    let dims = Dims::new(10, 10);
    let (dx, dy) = GLIDER.displacement;
    let mut cur = embed(GLIDER.frames[0], dims, 2, 2);
    for i in 1..=GLIDER.period() {
        cur = evolve(&cur, dims).unwrap();
        if i < GLIDER.period() {
            assert_eq!(cur, embed(GLIDER.frames[i], dims, 2, 2), "frame {i}");
        }
    }
    let moved = embed(GLIDER.frames[0], dims, (2 + dx) as usize, (2 + dy) as usize);
    assert_eq!(cur, moved);
}

#[test]
fn glider_crosses_a_torus_edge() {
    // Eight periods carry the glider (+8, +8): back home on an 8x8 torus.
    let mut grid = Grid::with_size(8, 8, Wrapped).unwrap();
    grid.stamp(GLIDER.frames[0], 1, 1).unwrap();
    let start = grid.snapshot();
    for _ in 0..GLIDER.period() * 8 {
        grid.evolve();
        assert_eq!(grid.population(), 5);
    }
    assert_eq!(grid.snapshot(), start);
}

#[test]
fn glider_settles_in_a_bounded_corner() {
    let mut grid = Grid::with_size(8, 8, Bounded).unwrap();
    grid.stamp(GLIDER.frames[0], 1, 1).unwrap();
    for _ in 0..GLIDER.period() * 8 {
        grid.evolve();
    }
    // The glider collides with the corner and settles into a block.
    assert_eq!(grid.population(), 4);
    let block_at_corner = grid.cell_at(6, 6) == Some(true)
        && grid.cell_at(7, 6) == Some(true)
        && grid.cell_at(6, 7) == Some(true)
        && grid.cell_at(7, 7) == Some(true);
    assert!(block_at_corner, "{:?}", grid.state());
}

#[test]
fn pattern_round_trips_through_state() {
    for p in CATALOG {
        for i in 0..p.period() {
            let grid = Grid::from_rows(p.frames[i], Bounded).unwrap();
            assert_eq!(grid.state(), p.rows(i), "{} frame {i}", p.name);
        }
    }
}

#[test]
fn resize_then_seed_then_step() {
    let mut grid = Grid::new(Bounded);
    grid.set_size(5, 5).unwrap();
    grid.stamp(BLINKER.frames[0], 1, 1).unwrap();
    grid.evolve();
    assert_eq!(grid.generation(), 1);
    assert_eq!(
        grid.state()[2],
        vec![false, true, true, true, false]
    );

    grid.set_size(3, 3).unwrap();
    assert_eq!(grid.generation(), 0);
    assert_eq!(grid.state()[2], vec![false, true, true]);
}
