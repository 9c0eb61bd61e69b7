//! Boundary to an external hand-scoring calculator.
//!
//! The engine never scores hands itself. It hands a [`ScoreRequest`] to a
//! [`Scorer`] and reads back a [`ScoreResult`].
use crate::error::HandError;
use crate::hand::{Hand, MAX_HAND_SIZE};
use crate::tile::{MAX_COPIES, NUM_TILE_TYPES, Tile};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

pub trait Scorer {
    fn estimate(&self, request: &ScoreRequest) -> Result<ScoreResult>;
}

impl<F> Scorer for F
where
    F: Fn(&ScoreRequest) -> Result<ScoreResult>,
{
    fn estimate(&self, request: &ScoreRequest) -> Result<ScoreResult> {
        self(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// All 14 tiles, including the winning tile.
    pub tiles: Vec<Tile>,
    pub winning_tile: Tile,
    /// Tsumo (self-drawn) rather than ron.
    pub self_drawn: bool,
}

impl ScoreRequest {
    /// `tiles` in 136-format (`type * 4 + copy`). Copies of a type are
    /// numbered in the order they appear.
    pub fn tiles_136(&self) -> Vec<u8> {
        let mut copies = [0_u8; NUM_TILE_TYPES];
        self.tiles
            .iter()
            .map(|tile| {
                let copy = &mut copies[tile.as_usize()];
                let id = tile.as_u8() * MAX_COPIES + *copy % MAX_COPIES;
                *copy += 1;
                id
            })
            .collect()
    }

    /// The winning tile in 136-format: the copy [`Self::tiles_136`] assigns
    /// to the last occurrence of `winning_tile` in `tiles`.
    pub fn winning_tile_136(&self) -> u8 {
        let ids = self.tiles_136();
        self.tiles
            .iter()
            .zip(&ids)
            .rev()
            .find(|&(&tile, _)| tile == self.winning_tile)
            .map_or(self.winning_tile.as_u8() * MAX_COPIES, |(_, &id)| id)
    }
}

/// What a calculator reports back. Fields it leaves out or sets to null are
/// read as zero or empty, which is also how a non-scoring hand looks.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub han: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub fu: u32,
    #[serde(default, alias = "score")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cost: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub yaku: Vec<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub fu_details: Vec<FuDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuDetail {
    pub fu: u32,
    pub reason: String,
}

impl ScoreResult {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("failed to parse score result")
    }

    pub fn is_scoring(&self) -> bool {
        self.han > 0 || !self.yaku.is_empty()
    }
}

impl Hand {
    /// The request for this hand, presenting its last tile as the winning
    /// tile. Only complete 14-tile hands can be scored.
    pub fn score_request(&self, self_drawn: bool) -> crate::Result<ScoreRequest> {
        let Some(&winning_tile) = self.tiles().last().filter(|_| self.len() == MAX_HAND_SIZE) else {
            return Err(HandError::InvalidHandSize(self.len()));
        };
        Ok(ScoreRequest {
            tiles: self.tiles().to_vec(),
            winning_tile,
            self_drawn,
        })
    }

    pub fn score(&self, scorer: &impl Scorer, self_drawn: bool) -> Result<ScoreResult> {
        let request = self.score_request(self_drawn)?;
        scorer
            .estimate(&request)
            .with_context(|| format!("failed to score hand {self}"))
    }
}
