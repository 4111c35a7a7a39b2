//! Exhaustive nearest-color scan

use crate::index::{ColorIndex, Neighbor, ensure_candidates};
use crate::io::error::{MosaicError, Result};
use crate::math::color::Color;
use crate::spatial::tiles::Tile;

/// Computes the distance to every tile on each query
///
/// The reference ordering every other index must reproduce.
#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    tiles: Vec<Tile>,
}

impl LinearIndex {
    /// Index a non-empty tile pool
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if `tiles` is empty
    pub fn build(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }
        Ok(Self { tiles })
    }
}

impl ColorIndex for LinearIndex {
    fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn nearest(&self, target: Color, k: usize) -> Result<Vec<Neighbor>> {
        ensure_candidates(&self.tiles)?;

        let mut neighbors: Vec<Neighbor> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(id, tile)| Neighbor {
                distance: tile.color().squared_distance(target),
                id,
            })
            .collect();

        // Stable: equal distances keep insertion order
        neighbors.sort_by_key(|neighbor| neighbor.distance);
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
