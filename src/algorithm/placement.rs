//! Tile choice per grid cell under anti-repetition or randomized variation
//!
//! Anti-cluster mode keeps `k` ranked slots (0 = nearest match, 1 = second
//! nearest, ...) and a history of cells each slot was used at. A cell takes
//! the first never-used slot, otherwise the slot whose closest previous use
//! is farthest away, spreading repeats of the same rank across the canvas.
//!
//! Noise mode walks candidates nearest first and accepts each with
//! probability `1 - noise`, falling back to a uniformly random candidate.

use crate::index::ColorIndex;
use crate::io::error::{MosaicError, Result, invalid_policy};
use crate::math::color::Color;
use crate::spatial::grid::GridCell;
use log::warn;
use rand::Rng;

/// Placement mode and its parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyConfig {
    /// Rotate among the `nearest` best matches to avoid clusters
    AntiCluster {
        /// Number of ranked slots, at least 1
        nearest: usize,
    },
    /// Randomly skip ahead to farther matches
    Noise {
        /// Skip probability per candidate, in [0, 1]
        noise: f64,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::Noise { noise: 0.0 }
    }
}

impl PolicyConfig {
    /// Check parameters, clamping noise above 1 down to 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicyConfig` for zero slots or negative / NaN noise
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::AntiCluster { nearest: 0 } => Err(invalid_policy(
                &"anti-cluster mode needs at least one nearest image",
            )),
            Self::AntiCluster { .. } => Ok(self),
            Self::Noise { noise } if noise.is_nan() || noise < 0.0 => Err(invalid_policy(
                &format!("noise {noise} must lie in [0, 1]"),
            )),
            Self::Noise { noise } => Ok(Self::Noise {
                noise: noise.min(1.0),
            }),
        }
    }
}

/// Per-slot history of the cells each slot was placed at
#[derive(Debug, Clone, Default)]
pub struct SlotHistory {
    slots: Vec<Vec<GridCell>>,
}

impl SlotHistory {
    /// Empty history for `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); slot_count],
        }
    }

    /// Number of slots tracked
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Cells recorded for `slot`, in placement order
    pub fn positions(&self, slot: usize) -> &[GridCell] {
        self.slots.get(slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Slot to use at `cell`
    ///
    /// The first never-used slot wins outright. Otherwise the slot with the
    /// largest distance to its closest recorded cell wins; ties keep the
    /// lowest slot.
    pub fn choose(&self, cell: GridCell) -> usize {
        let mut chosen = 0;
        let mut farthest = 0;

        for (slot, positions) in self.slots.iter().enumerate() {
            let Some(closest) = positions
                .iter()
                .map(|&position| cell.squared_distance(position))
                .min()
            else {
                return slot;
            };

            if closest > farthest {
                farthest = closest;
                chosen = slot;
            }
        }

        chosen
    }

    /// Remember that `slot` was used at `cell`
    pub fn record(&mut self, slot: usize, cell: GridCell) {
        if let Some(positions) = self.slots.get_mut(slot) {
            positions.push(cell);
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    AntiCluster(SlotHistory),
    Noise(f64),
}

/// Picks one tile per cell from the index's nearest candidates
///
/// The random source is only consumed in noise mode.
#[derive(Debug, Clone)]
pub struct PlacementPolicy<R: Rng> {
    mode: Mode,
    rng: R,
}

impl<R: Rng> PlacementPolicy<R> {
    /// Create a policy for a pool of `pool_size` tiles
    ///
    /// Anti-cluster slots are capped at the pool size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicyConfig` if `config` fails validation and
    /// `EmptyTileSet` for an empty pool
    pub fn new(config: PolicyConfig, pool_size: usize, rng: R) -> Result<Self> {
        if pool_size == 0 {
            return Err(MosaicError::EmptyTileSet);
        }

        let mode = match config.validate()? {
            PolicyConfig::AntiCluster { nearest } => {
                if nearest > pool_size {
                    warn!("Only {pool_size} tiles available, using {pool_size} of {nearest} nearest slots");
                }
                Mode::AntiCluster(SlotHistory::new(nearest.min(pool_size)))
            }
            PolicyConfig::Noise { noise } => Mode::Noise(noise),
        };

        Ok(Self { mode, rng })
    }

    /// Slot history, present in anti-cluster mode only
    pub const fn history(&self) -> Option<&SlotHistory> {
        match &self.mode {
            Mode::AntiCluster(history) => Some(history),
            Mode::Noise(_) => None,
        }
    }

    /// Choose the tile for `cell` whose mean color is `target`
    ///
    /// Returns the insertion position of the chosen tile in `index`.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidates` if the index yields no candidate for the
    /// chosen rank
    pub fn select(&mut self, index: &dyn ColorIndex, cell: GridCell, target: Color) -> Result<usize> {
        match &mut self.mode {
            Mode::AntiCluster(history) => {
                let slot = history.choose(cell);
                history.record(slot, cell);

                let candidates = index.nearest(target, history.slot_count())?;
                candidates
                    .get(slot)
                    .map(|neighbor| neighbor.id)
                    .ok_or(MosaicError::NoCandidates)
            }
            Mode::Noise(noise) => {
                let noise = *noise;
                if noise <= 0.0 {
                    return index
                        .nearest(target, 1)?
                        .first()
                        .map(|neighbor| neighbor.id)
                        .ok_or(MosaicError::NoCandidates);
                }

                let candidates = index.nearest(target, index.len())?;
                if candidates.is_empty() {
                    return Err(MosaicError::NoCandidates);
                }

                for candidate in &candidates {
                    if self.rng.random::<f64>() > noise {
                        return Ok(candidate.id);
                    }
                }

                let fallback = self.rng.random_range(0..candidates.len());
                candidates
                    .get(fallback)
                    .map(|neighbor| neighbor.id)
                    .ok_or(MosaicError::NoCandidates)
            }
        }
    }
}
