use super::{Hand, stack_grids};
use crate::tile::Tile;
use std::fmt;

use ndarray::prelude::*;

/// `a.grid - b.grid`. A positive cell is a tile `a` must discard to become
/// `b`, a negative cell a tile it must draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandDiff {
    grid: Array2<i8>,
}

impl HandDiff {
    pub(super) fn between(a: &Hand, b: &Hand) -> Self {
        Self {
            grid: signed(a.grid.view()) - signed(b.grid.view()),
        }
    }

    #[inline]
    pub fn grid(&self) -> ArrayView2<'_, i8> {
        self.grid.view()
    }

    /// Sum of the positive cells. For two hands of the same size this equals
    /// the sum of the negative cells and is the number of moves between them.
    pub fn distance(&self) -> u32 {
        self.grid.iter().map(|&d| d.max(0) as u32).sum()
    }

    pub fn is_identical(&self) -> bool {
        self.grid.iter().all(|&d| d == 0)
    }

    /// Tiles to draw, in index order, repeated by count.
    pub fn draw_tiles(&self) -> Vec<Tile> {
        self.tiles_where(|d| -d)
    }

    /// Tiles to discard, in index order, repeated by count.
    pub fn discard_tiles(&self) -> Vec<Tile> {
        self.tiles_where(|d| d)
    }

    fn tiles_where(&self, count: impl Fn(i8) -> i8) -> Vec<Tile> {
        self.grid
            .indexed_iter()
            .filter(|&(_, &d)| count(d) > 0)
            .filter_map(|((row, col), &d)| {
                let tile = Tile::from_grid_position(row, col).ok()?;
                Some(std::iter::repeat_n(tile, count(d) as usize))
            })
            .flatten()
            .collect()
    }
}

impl fmt::Display for HandDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identical() {
            return f.write_str("Identical hands");
        }
        let join = |tiles: Vec<Tile>| tiles.iter().map(Tile::to_string).collect::<Vec<_>>().join(" ");
        write!(
            f,
            "Draw: {} / Discard: {}",
            join(self.draw_tiles()),
            join(self.discard_tiles())
        )
    }
}

/// Differences of one hand against many, stacked along a leading axis.
#[derive(Debug, Clone)]
pub struct HandDiffs {
    batch: Array3<i8>,
    diffs: Vec<HandDiff>,
}

impl HandDiffs {
    pub(super) fn between(hand: &Hand, others: &[Hand]) -> Self {
        let batch = batch_diff(hand, &stack_grids(others));
        let diffs = batch
            .outer_iter()
            .map(|grid| HandDiff { grid: grid.to_owned() })
            .collect();
        Self { batch, diffs }
    }

    /// The N×4×9 signed grid.
    #[inline]
    pub fn batch(&self) -> ArrayView3<'_, i8> {
        self.batch.view()
    }

    pub fn distances(&self) -> Array1<u32> {
        reduce_distances(&self.batch)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HandDiff> {
        self.diffs.iter()
    }
}

impl std::ops::Index<usize> for HandDiffs {
    type Output = HandDiff;

    fn index(&self, idx: usize) -> &HandDiff {
        &self.diffs[idx]
    }
}

impl<'a> IntoIterator for &'a HandDiffs {
    type Item = &'a HandDiff;
    type IntoIter = std::slice::Iter<'a, HandDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.iter()
    }
}

pub(super) fn batch_distances(hand: &Hand, others: &Array3<u8>) -> Array1<u32> {
    reduce_distances(&batch_diff(hand, others))
}

fn batch_diff(hand: &Hand, others: &Array3<u8>) -> Array3<i8> {
    let own = signed(hand.grid.view()).insert_axis(Axis(0));
    &own - &others.mapv(|c| c as i8)
}

/// Clipped-positive sum over the two trailing grid axes.
fn reduce_distances(batch: &Array3<i8>) -> Array1<u32> {
    batch
        .mapv(|d| d.max(0) as u32)
        .sum_axis(Axis(2))
        .sum_axis(Axis(1))
}

fn signed(grid: ArrayView2<'_, u8>) -> Array2<i8> {
    grid.mapv(|c| c as i8)
}
