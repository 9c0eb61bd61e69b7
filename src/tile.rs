//! The 34 tile types and their encodings.
//!
//! A tile is identified by its flat index in `0..34`: cracks `0..9`, dots
//! `9..18`, boos `18..27`, then the honors in the order east, south, west,
//! north, white, green, red. The same tile sits at `(index / 9, index % 9)`
//! in the 4×9 count grid, so row 3 only uses its first 7 columns.
use crate::error::{HandError, Result};
use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

pub const NUM_TILE_TYPES: usize = 34;
pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 9;
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;
/// Physical copies of each tile type in a set.
pub const MAX_COPIES: u8 = 4;

const SUIT_LETTERS: [char; 3] = ['c', 'd', 'b'];
const SUIT_NAMES: [&str; 3] = ["crack", "dot", "boo"];
const SUIT_ASSET_PREFIXES: [&str; 3] = ["Man", "Pin", "Sou"];
const HONOR_NAMES: [&str; 7] = ["east", "south", "west", "north", "white", "green", "red"];
const HONOR_ASSET_KEYS: [&str; 7] = ["Ton", "Nan", "Shaa", "Pei", "Haku", "Hatsu", "Chun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Crack,
    Dot,
    Boo,
    Honor,
}

/// The accepted input forms for [`Tile::new`].
#[derive(Debug, Clone, Copy)]
pub enum TileRepr<'a> {
    /// `"3c"`, `"9b"`, `"east"`, `"red"`, ...
    Str(&'a str),
    /// Flat index in `0..34`.
    Index(usize),
    /// `(row, col)` cell of the count grid.
    Grid(usize, usize),
}

impl<'a> From<&'a str> for TileRepr<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl From<usize> for TileRepr<'_> {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<(usize, usize)> for TileRepr<'_> {
    fn from((row, col): (usize, usize)) -> Self {
        Self::Grid(row, col)
    }
}

/// One of the 34 tile types. Copies of the same type are indistinguishable.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Tile(u8);

impl Tile {
    pub fn new<'a>(repr: impl Into<TileRepr<'a>>) -> Result<Self> {
        match repr.into() {
            TileRepr::Str(s) => s.parse(),
            TileRepr::Index(i) => Self::try_from(i),
            TileRepr::Grid(row, col) => Self::from_grid_position(row, col),
        }
    }

    pub fn from_grid_position(row: usize, col: usize) -> Result<Self> {
        if is_tile_cell(row, col) {
            Ok(Self((row * GRID_COLS + col) as u8))
        } else {
            Err(HandError::InvalidTile(format!("grid position ({row}, {col})")))
        }
    }

    /// All 34 tile types in index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..NUM_TILE_TYPES as u8).map(Self)
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn grid_position(self) -> (usize, usize) {
        (self.as_usize() / GRID_COLS, self.as_usize() % GRID_COLS)
    }

    pub const fn suit(self) -> Suit {
        match self.0 / GRID_COLS as u8 {
            0 => Suit::Crack,
            1 => Suit::Dot,
            2 => Suit::Boo,
            _ => Suit::Honor,
        }
    }

    /// 1-9 for numeral tiles, `None` for honors.
    pub const fn rank(self) -> Option<u8> {
        if self.is_honor() { None } else { Some(self.0 % GRID_COLS as u8 + 1) }
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= 27
    }

    /// Long form, e.g. `3 crack`, `east wind`, `red dragon`.
    pub fn name(self) -> String {
        let (row, col) = self.grid_position();
        match self.suit() {
            Suit::Honor if col < 4 => format!("{} wind", HONOR_NAMES[col]),
            Suit::Honor => format!("{} dragon", HONOR_NAMES[col]),
            _ => format!("{} {}", col + 1, SUIT_NAMES[row]),
        }
    }

    /// Name of the tile's visual asset, without extension.
    pub fn asset_key(self) -> String {
        let (row, col) = self.grid_position();
        match self.suit() {
            Suit::Honor => HONOR_ASSET_KEYS[col].to_owned(),
            _ => format!("{}{}", SUIT_ASSET_PREFIXES[row], col + 1),
        }
    }
}

/// Whether `(row, col)` holds a tile type. Row 3 columns 7 and 8 never do.
#[inline]
pub const fn is_tile_cell(row: usize, col: usize) -> bool {
    row < GRID_ROWS && col < GRID_COLS && !(row == GRID_ROWS - 1 && col >= HONOR_NAMES.len())
}

impl TryFrom<u8> for Tile {
    type Error = HandError;

    fn try_from(v: u8) -> Result<Self> {
        if (v as usize) < NUM_TILE_TYPES {
            Ok(Self(v))
        } else {
            Err(HandError::InvalidTile(format!("index {v}")))
        }
    }
}

impl TryFrom<usize> for Tile {
    type Error = HandError;

    fn try_from(v: usize) -> Result<Self> {
        u8::try_from(v)
            .map_err(|_| HandError::InvalidTile(format!("index {v}")))
            .and_then(Self::try_from)
    }
}

impl FromStr for Tile {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HandError::InvalidTile(s.to_owned());
        if let Some(col) = HONOR_NAMES.iter().position(|&name| name == s) {
            return Self::from_grid_position(GRID_ROWS - 1, col);
        }
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let rank = rank.to_digit(10).filter(|r| (1..=9).contains(r)).ok_or_else(invalid)?;
        let row = SUIT_LETTERS.iter().position(|&l| l == suit).ok_or_else(invalid)?;
        Self::from_grid_position(row, rank as usize - 1)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.grid_position();
        match self.suit() {
            Suit::Honor => f.write_str(HONOR_NAMES[col]),
            _ => write!(f, "{}{}", col + 1, SUIT_LETTERS[row]),
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}={self})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn index_round_trip() {
        for i in 0..NUM_TILE_TYPES {
            let tile = Tile::try_from(i).unwrap();
            assert_eq!(tile.as_usize(), i);
            let (row, col) = tile.grid_position();
            assert_eq!(Tile::from_grid_position(row, col).unwrap(), tile);
            assert_eq!(tile.to_string().parse::<Tile>().unwrap(), tile);
        }
        assert_eq!(Tile::all().len(), NUM_TILE_TYPES);
    }

    #[test]
    fn layout() {
        assert_eq!(Tile::new("1c").unwrap().as_u8(), 0);
        assert_eq!(Tile::new("9c").unwrap().as_u8(), 8);
        assert_eq!(Tile::new("1d").unwrap().as_u8(), 9);
        assert_eq!(Tile::new("5b").unwrap().grid_position(), (2, 4));
        assert_eq!(Tile::new("east").unwrap().as_u8(), 27);
        assert_eq!(Tile::new("red").unwrap().grid_position(), (3, 6));
        assert_eq!(Tile::new((3_usize, 3_usize)).unwrap().to_string(), "north");
        assert_eq!(Tile::new(31_usize).unwrap().to_string(), "white");
    }

    #[test]
    fn names() {
        let t = |s| Tile::new(s).unwrap();
        assert_eq!(t("3c").name(), "3 crack");
        assert_eq!(t("7b").name(), "7 boo");
        assert_eq!(t("west").name(), "west wind");
        assert_eq!(t("green").name(), "green dragon");
        assert_eq!(t("4d").asset_key(), "Pin4");
        assert_eq!(t("2b").asset_key(), "Sou2");
        assert_eq!(t("north").asset_key(), "Pei");
        assert_eq!(t("white").asset_key(), "Haku");
        assert_eq!(t("9c").suit(), Suit::Crack);
        assert_eq!(t("9c").rank(), Some(9));
        assert_eq!(t("south").rank(), None);
    }

    #[test]
    fn rejects_malformed() {
        for s in ["", "0c", "10c", "3x", "c3", "3", "East", "blue", "3cc", " 3c"] {
            assert!(matches!(s.parse::<Tile>(), Err(HandError::InvalidTile(_))), "{s}");
        }
        assert!(matches!(Tile::try_from(34_usize), Err(HandError::InvalidTile(_))));
        assert!(matches!(Tile::try_from(300_usize), Err(HandError::InvalidTile(_))));
        assert!(matches!(Tile::new((3_usize, 7_usize)), Err(HandError::InvalidTile(_))));
        assert!(matches!(Tile::new((3_usize, 8_usize)), Err(HandError::InvalidTile(_))));
        assert!(matches!(Tile::new((4_usize, 0_usize)), Err(HandError::InvalidTile(_))));
    }

    #[test]
    fn serde_as_string() {
        let tiles = vec![Tile::new("3c").unwrap(), Tile::new("red").unwrap()];
        let json = serde_json::to_string(&tiles).unwrap();
        assert_eq!(json, r#"["3c","red"]"#);
        let back: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tiles);
        serde_json::from_str::<Tile>(r#""8x""#).unwrap_err();
    }

    proptest! {
        #[test]
        fn valid_cells_are_tiles(row in 0..GRID_ROWS, col in 0..GRID_COLS) {
            let tile = Tile::from_grid_position(row, col);
            prop_assert_eq!(tile.is_ok(), is_tile_cell(row, col));
            if let Ok(tile) = tile {
                prop_assert_eq!(tile.grid_position(), (row, col));
            }
        }
    }
}
