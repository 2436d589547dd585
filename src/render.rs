use rayon::prelude::*;

use crate::error::{LifeError, Result};
use crate::snapshot::{Dims, Snapshot};

const ALIVE: [u8; 4] = [40, 70, 200, 255];
const DEAD: [u8; 4] = [245, 245, 240, 255];
const GRID_LINE: [u8; 4] = [200, 200, 195, 255];

/// Cells smaller than this are drawn without grid lines.
const MIN_LINED_CELL: usize = 4;

/// Pixel size of a rendered world. `DimensionsOverflow` when the RGBA buffer
/// would not be addressable.
pub fn image_size(dims: Dims, cell_size: usize) -> Result<(usize, usize)> {
    let overflow = || LifeError::DimensionsOverflow {
        width: dims.width,
        height: dims.height,
    };
    let w = dims.width.checked_mul(cell_size).ok_or_else(overflow)?;
    let h = dims.height.checked_mul(cell_size).ok_or_else(overflow)?;
    w.checked_mul(h)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(overflow)?;
    Ok((w, h))
}

/// Render one generation as RGBA, `cell_size` pixels per cell side.
/// Rows of pixels are filled in parallel.
pub fn render_snapshot(snapshot: &Snapshot, cell_size: usize) -> Result<Vec<u8>> {
    let dims = snapshot.dims();
    let cells = snapshot.cells();
    let (w, h) = image_size(dims, cell_size)?;
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 || h == 0 {
        return Ok(rgba);
    }
    let lined = cell_size >= MIN_LINED_CELL;

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(py, row)| {
            let cy = py / cell_size;
            let edge_y = lined && py % cell_size == cell_size - 1;
            for px in 0..w {
                let cx = px / cell_size;
                let edge_x = lined && px % cell_size == cell_size - 1;
                let color = if edge_x || edge_y {
                    GRID_LINE
                } else if cells[dims.index(cx, cy)] {
                    ALIVE
                } else {
                    DEAD
                };
                row[px * 4..px * 4 + 4].copy_from_slice(&color);
            }
        });

    Ok(rgba)
}
