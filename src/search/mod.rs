//! Neighborhood search: every hand reachable from a seed within a number of
//! draw/discard moves.
//!
//! Levels are expanded breadth-first. Each level only expands the states it
//! discovered for the first time, and every candidate is checked against all
//! states seen at any shallower depth, so no state is expanded twice and the
//! depth a state is recorded at is its distance from the seed.
mod expand;

use crate::error::{HandError, Result};
use crate::hand::{GridKey, Hand, stack_grids};
use std::time::{Duration, Instant};

use ahash::{AHashMap, AHashSet};
use anyhow::Context;
use derivative::Derivative;
use log::{debug, trace, warn};
use ndarray::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Expand frontier chunks on the rayon thread pool.
    pub parallel: bool,
    /// Frontier states per batched expansion.
    pub chunk_size: usize,
    /// Wall-clock budget for one search, checked between chunks.
    pub timeout_ms: Option<u64>,
    /// Upper bound on the number of distinct states a search may visit,
    /// including the seed.
    pub max_states: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_size: 64,
            timeout_ms: None,
            max_states: None,
        }
    }
}

impl SearchConfig {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("failed to parse search config")
    }
}

#[derive(Debug, Clone, Default)]
pub struct NeighborSearch {
    config: SearchConfig,
}

impl NeighborSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Every distinct hand `1..=moves` draw/discard moves away from `hand`.
    /// The seed itself is never part of the result.
    pub fn neighbors(&self, hand: &Hand, moves: usize) -> Result<Neighborhood> {
        if moves < 1 {
            return Err(HandError::InvalidMoveCount(moves));
        }
        let start = Instant::now();
        let deadline = self.config.timeout_ms.map(|ms| start + Duration::from_millis(ms));

        let seed = hand.key();
        let mut visited = AHashSet::from_iter([seed]);
        let mut levels: Vec<Vec<GridKey>> = vec![];
        let mut frontier = vec![seed];

        for depth in 1..=moves {
            if frontier.is_empty() {
                break;
            }
            let candidates = self.expand_level(&frontier, deadline, depth)?;
            let n_candidates = candidates.len();

            let mut fresh = candidates
                .into_iter()
                .filter(|key| visited.insert(*key))
                .collect::<Vec<_>>();
            fresh.sort_unstable();

            if let Some(limit) = self.config.max_states
                && visited.len() > limit
            {
                warn!("neighbor search stopped at depth {depth}: {} states > {limit}", visited.len());
                return Err(HandError::SearchLimitExceeded { limit });
            }
            debug!(
                "depth {depth}: {} states -> {n_candidates} candidates, {} new ({:?})",
                frontier.len(),
                fresh.len(),
                start.elapsed(),
            );

            levels.push(fresh.clone());
            frontier = fresh;
        }

        Neighborhood::from_levels(levels)
    }

    fn expand_level(&self, frontier: &[GridKey], deadline: Option<Instant>, depth: usize) -> Result<Vec<GridKey>> {
        let chunk_size = self.config.chunk_size.max(1);
        let expand_chunk = |chunk: &[GridKey]| {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!("neighbor search timed out at depth {depth}");
                return Err(HandError::SearchTimedOut { depth });
            }
            let batch = expand::expand_batch(ArrayView2::from(chunk));
            trace!("depth {depth}: chunk of {} -> {}", chunk.len(), batch.len());
            Ok(batch)
        };
        let chunks = if self.config.parallel {
            frontier
                .par_chunks(chunk_size)
                .map(expand_chunk)
                .collect::<Result<Vec<_>>>()?
        } else {
            frontier
                .chunks(chunk_size)
                .map(expand_chunk)
                .collect::<Result<Vec<_>>>()?
        };
        Ok(chunks.into_iter().flatten().collect())
    }
}

/// The distinct hands found by a search, with the depth each was first
/// reached at. Hands are grouped by depth, and sorted by grid within a depth.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Neighborhood {
    hands: Vec<Hand>,
    /// `hands[level_starts[d - 1]..level_starts[d]]` were reached at depth `d`.
    level_starts: Vec<usize>,
    #[derivative(Debug = "ignore")]
    index: AHashMap<GridKey, usize>,
}

impl Neighborhood {
    fn from_levels(levels: Vec<Vec<GridKey>>) -> Result<Self> {
        let mut hands = vec![];
        let mut level_starts = vec![0];
        let mut index = AHashMap::new();
        for level in levels {
            for key in level {
                index.insert(key, hands.len());
                hands.push(Hand::from_key(&key)?);
            }
            level_starts.push(hands.len());
        }
        Ok(Self {
            hands,
            level_starts,
            index,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Number of levels that were expanded.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.level_starts.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.hands.iter()
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.index.contains_key(&hand.key())
    }

    /// Depth at which `hand` was first reached, which is also its distance
    /// from the seed.
    pub fn depth_of(&self, hand: &Hand) -> Option<usize> {
        let idx = *self.index.get(&hand.key())?;
        Some(self.level_starts.partition_point(|&start| start <= idx))
    }

    /// Hands first reached at `depth`. Empty for depth 0 or beyond the
    /// searched range.
    pub fn at_depth(&self, depth: usize) -> &[Hand] {
        match (depth.checked_sub(1), self.level_starts.get(depth)) {
            (Some(prev), Some(&end)) => &self.hands[self.level_starts[prev]..end],
            _ => &[],
        }
    }

    /// All grids stacked along a leading axis, in [`Self::iter`] order.
    pub fn grids(&self) -> Array3<u8> {
        stack_grids(&self.hands)
    }

    /// Distance from `hand` to every member, in [`Self::iter`] order.
    pub fn distances_from(&self, hand: &Hand) -> Array1<u32> {
        hand.distances(&self.hands)
    }

    pub fn into_hands(self) -> Vec<Hand> {
        self.hands
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}
