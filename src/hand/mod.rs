//! Hands of 13 or 14 tiles, kept both as a tile list and as a 4×9 count grid.
mod diff;

pub use diff::{HandDiff, HandDiffs};

use crate::error::{HandError, Result};
use crate::search::{NeighborSearch, Neighborhood};
use crate::tile::{GRID_CELLS, GRID_COLS, GRID_ROWS, Tile};
use std::fmt;
use std::ops::{Index, RangeInclusive};
use std::str::FromStr;

use derivative::Derivative;
use ndarray::prelude::*;
use tinyvec::ArrayVec;

pub const HAND_SIZES: RangeInclusive<usize> = 13..=14;
pub const MAX_HAND_SIZE: usize = *HAND_SIZES.end();

/// Row-major copy of a grid, used as the identity of a hand state.
pub(crate) type GridKey = [u8; GRID_CELLS];

/// A closed hand.
///
/// The tile list keeps the order the hand was built or drawn in (the last
/// tile is the one presented as the winning tile when scoring). Equality and
/// hashing only look at the grid, so two hands holding the same tiles in a
/// different order are equal.
#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq, Eq, Hash)]
pub struct Hand {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    tiles: ArrayVec<[Tile; MAX_HAND_SIZE]>,
    #[derivative(Debug = "ignore")]
    grid: Array2<u8>,
}

impl Hand {
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let tiles = tiles.into_iter().collect::<Vec<_>>();
        if !HAND_SIZES.contains(&tiles.len()) {
            return Err(HandError::InvalidHandSize(tiles.len()));
        }
        let mut grid = Array2::zeros((GRID_ROWS, GRID_COLS));
        for tile in &tiles {
            grid[tile.grid_position()] += 1;
        }
        Ok(Self {
            tiles: tiles.into_iter().collect(),
            grid,
        })
    }

    /// Parses each item with [`Tile::from_str`].
    pub fn from_strs<I, S>(tiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tiles = tiles
            .into_iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Tile>>>()?;
        Self::new(tiles)
    }

    /// Builds a hand from a count grid. The tile list comes out in ascending
    /// index order, each tile repeated by its count.
    pub fn from_grid(grid: ArrayView2<'_, u8>) -> Result<Self> {
        if grid.shape() != [GRID_ROWS, GRID_COLS] {
            return Err(HandError::InvalidShape(grid.shape().to_vec()));
        }
        let total = grid.iter().map(|&c| c as usize).sum::<usize>();
        if !HAND_SIZES.contains(&total) {
            return Err(HandError::InvalidHandSize(total));
        }
        let mut tiles = ArrayVec::new();
        for ((row, col), &count) in grid.indexed_iter() {
            if count == 0 {
                continue;
            }
            let tile = Tile::from_grid_position(row, col)?;
            tiles.extend(std::iter::repeat_n(tile, count as usize));
        }
        Ok(Self {
            tiles,
            grid: grid.to_owned(),
        })
    }

    pub(crate) fn from_key(key: &GridKey) -> Result<Self> {
        let grid = Array2::from_shape_fn((GRID_ROWS, GRID_COLS), |(r, c)| key[r * GRID_COLS + c]);
        Self::from_grid(grid.view())
    }

    pub(crate) fn key(&self) -> GridKey {
        let mut key = [0; GRID_CELLS];
        for (k, &c) in key.iter_mut().zip(self.grid.iter()) {
            *k = c;
        }
        key
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn grid(&self) -> ArrayView2<'_, u8> {
        self.grid.view()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false, a hand holds at least 13 tiles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn count(&self, tile: Tile) -> u8 {
        self.grid[tile.grid_position()]
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }

    /// Draws `draw` and discards one copy of `discard`, returning the new
    /// hand. The drawn tile goes to the end of the tile list.
    ///
    /// The 4-copy cap is not checked here.
    pub fn draw_discard(&self, draw: Tile, discard: Tile) -> Result<Self> {
        let idx = self
            .tiles
            .iter()
            .position(|&t| t == discard)
            .ok_or(HandError::TileNotInHand(discard))?;
        let mut tiles = self.tiles.clone();
        tiles.remove(idx);
        tiles.push(draw);

        let mut grid = self.grid.clone();
        grid[discard.grid_position()] -= 1;
        grid[draw.grid_position()] += 1;
        Ok(Self { tiles, grid })
    }

    pub fn diff(&self, other: &Self) -> HandDiff {
        HandDiff::between(self, other)
    }

    /// Minimum number of draw/discard moves from `self` to `other`.
    pub fn distance(&self, other: &Self) -> u32 {
        self.diff(other).distance()
    }

    pub fn diff_many(&self, others: &[Self]) -> HandDiffs {
        HandDiffs::between(self, others)
    }

    /// [`Self::distance`] against every hand in `others`, in one pass.
    pub fn distances(&self, others: &[Self]) -> Array1<u32> {
        diff::batch_distances(self, &stack_grids(others))
    }

    /// Every distinct hand 1 to `moves` draw/discard moves away, searched
    /// with the default [`crate::search::SearchConfig`].
    pub fn neighbors(&self, moves: usize) -> Result<Neighborhood> {
        NeighborSearch::default().neighbors(self, moves)
    }
}

/// Stacks the grids of `hands` along a new leading axis.
pub(crate) fn stack_grids<'a>(hands: impl IntoIterator<Item = &'a Hand, IntoIter: ExactSizeIterator>) -> Array3<u8> {
    let hands = hands.into_iter();
    let mut out = Array3::zeros((hands.len(), GRID_ROWS, GRID_COLS));
    for (mut slot, hand) in out.outer_iter_mut().zip(hands) {
        slot.assign(&hand.grid);
    }
    out
}

impl Index<usize> for Hand {
    type Output = Tile;

    fn index(&self, idx: usize) -> &Tile {
        &self.tiles[idx]
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, tile) in self.tiles.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tile}")?;
        }
        f.write_str("]")
    }
}

/// Accepts the [`fmt::Display`] form (`[1c,2c,...]`) as well as tiles
/// separated by commas and/or whitespace.
impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(s);
        Self::from_strs(s.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()))
    }
}
