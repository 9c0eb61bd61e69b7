use crate::tile::Tile;
use std::error::Error;
use std::fmt;

pub type Result<T, E = HandError> = std::result::Result<T, E>;

/// Input errors raised by the hand engine. None of them are transient, they
/// are returned to the caller as soon as they are detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// Malformed tile string or out-of-range index/grid position.
    InvalidTile(String),
    /// A hand must hold 13 or 14 tiles.
    InvalidHandSize(usize),
    /// Grid input is not 4×9.
    InvalidShape(Vec<usize>),
    TileNotInHand(Tile),
    InvalidMoveCount(usize),
    /// Zero or more than one asset matched `key`.
    AssetNotFound { key: String, matches: usize },
    /// The search deadline passed before level `depth` finished.
    SearchTimedOut { depth: usize },
    /// The visited set grew past the configured `max_states`.
    SearchLimitExceeded { limit: usize },
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTile(s) => write!(f, "invalid tile {s:?}"),
            Self::InvalidHandSize(n) => write!(f, "a hand has 13 or 14 tiles, not {n}"),
            Self::InvalidShape(shape) => write!(f, "grid must have shape [4, 9], got {shape:?}"),
            Self::TileNotInHand(tile) => write!(f, "discard tile {tile} not found in hand"),
            Self::InvalidMoveCount(n) => write!(f, "need at least one move, got {n}"),
            Self::AssetNotFound { key, matches } => {
                write!(f, "expected exactly one asset for {key}, but found {matches}")
            }
            Self::SearchTimedOut { depth } => write!(f, "neighbor search timed out at depth {depth}"),
            Self::SearchLimitExceeded { limit } => {
                write!(f, "neighbor search visited more than {limit} states")
            }
        }
    }
}

impl Error for HandError {}
