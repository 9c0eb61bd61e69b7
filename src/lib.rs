//! Hand distances and draw/discard neighborhoods for mahjong hands.
//!
//! ```
//! use kyori::Hand;
//!
//! let hand: Hand = "1c 2c 3c 4c 5c 6c 7d 8d 9d 2b 3b 4b east east".parse()?;
//! let next = hand.draw_discard("red".parse()?, "east".parse()?)?;
//! assert_eq!(hand.distance(&next), 1);
//! assert!(hand.neighbors(1)?.contains(&next));
//! # Ok::<(), kyori::HandError>(())
//! ```
pub mod asset;
pub mod error;
pub mod hand;
pub mod score;
pub mod search;
pub mod tile;

pub use error::{HandError, Result};
pub use hand::{Hand, HandDiff, HandDiffs};
pub use search::{NeighborSearch, Neighborhood, SearchConfig};
pub use tile::{Suit, Tile, TileRepr};
