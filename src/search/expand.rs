//! One draw/discard step over a batch of states.
use crate::hand::GridKey;
use crate::tile::{GRID_CELLS, GRID_COLS, MAX_COPIES, is_tile_cell};
use std::sync::LazyLock;

use ahash::AHashSet;
use ndarray::prelude::*;

/// Cells of the flattened grid that hold a tile type.
const TILE_CELLS: [bool; GRID_CELLS] = {
    let mut cells = [false; GRID_CELLS];
    let mut i = 0;
    while i < GRID_CELLS {
        cells[i] = is_tile_cell(i / GRID_COLS, i % GRID_COLS);
        i += 1;
    }
    cells
};

/// Row `i` is the flattened grid holding a single tile at cell `i`.
static ONE_HOT: LazyLock<Array2<i8>> = LazyLock::new(|| Array2::eye(GRID_CELLS));

/// Expands every row of `frontier` (N×36 flattened grids) by one move and
/// returns the distinct results. Moves that draw the tile they discard are
/// skipped.
pub(super) fn expand_batch(frontier: ArrayView2<'_, u8>) -> Vec<GridKey> {
    let mut seen = AHashSet::new();
    for state in frontier.outer_iter() {
        expand_state(state, &mut seen);
    }
    seen.into_iter().collect()
}

fn expand_state(state: ArrayView1<'_, u8>, seen: &mut AHashSet<GridKey>) {
    let draws = (0..GRID_CELLS)
        .filter(|&i| TILE_CELLS[i] && state[i] < MAX_COPIES)
        .collect::<Vec<_>>();
    let discards = (0..GRID_CELLS).filter(|&i| state[i] > 0).collect::<Vec<_>>();
    if draws.is_empty() || discards.is_empty() {
        return;
    }

    // (draws, 1, 36) - (1, discards, 36) + (36,) -> (draws, discards, 36)
    let draw_rows = ONE_HOT.select(Axis(0), &draws).insert_axis(Axis(1));
    let discard_rows = ONE_HOT.select(Axis(0), &discards).insert_axis(Axis(0));
    let candidates = &(&draw_rows - &discard_rows) + &state.mapv(|c| c as i8);

    for (&draw, per_draw) in draws.iter().zip(candidates.outer_iter()) {
        for (&discard, grid) in discards.iter().zip(per_draw.outer_iter()) {
            if draw == discard {
                continue;
            }
            let mut key = [0; GRID_CELLS];
            for (k, &c) in key.iter_mut().zip(grid.iter()) {
                *k = c as u8;
            }
            // an all-zero grid can only come from a malformed input state
            if key.iter().any(|&c| c > 0) {
                seen.insert(key);
            }
        }
    }
}
