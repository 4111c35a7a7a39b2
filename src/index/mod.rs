//! Nearest-color lookup over a pool of prepared tiles
//!
//! Every index orders results by squared distance to the query color and
//! breaks exact ties by the order tiles were inserted in, so all strategies
//! return identical sequences for the same pool and query.

/// Three-dimensional k-d tree
pub mod kdtree;
/// Exhaustive scan with a stable sort
pub mod linear;

use crate::io::error::{MosaicError, Result};
use crate::math::color::Color;
use crate::spatial::tiles::Tile;

pub use kdtree::KdTreeIndex;
pub use linear::LinearIndex;

/// A query result: tile position in the pool and its distance to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighbor {
    /// Squared distance between the tile color and the query color
    pub distance: u32,
    /// Insertion position of the tile
    pub id: usize,
}

/// Read-only k-nearest lookup by color
///
/// Implementations hold no mutable state, so concurrent queries are safe.
pub trait ColorIndex: Send + Sync {
    /// Tiles in insertion order
    fn tiles(&self) -> &[Tile];

    /// Up to `k` neighbors of `target`, nearest first
    ///
    /// Returns all tiles when `k` exceeds the pool size.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidates` if the index holds no tiles
    fn nearest(&self, target: Color, k: usize) -> Result<Vec<Neighbor>>;

    /// Up to `k` tiles closest to `target`, nearest first
    ///
    /// # Errors
    ///
    /// Returns `NoCandidates` if the index holds no tiles
    fn query(&self, target: Color, k: usize) -> Result<Vec<&Tile>> {
        let neighbors = self.nearest(target, k)?;
        Ok(neighbors
            .iter()
            .filter_map(|neighbor| self.tile(neighbor.id))
            .collect())
    }

    /// Tile at insertion position `id`
    fn tile(&self, id: usize) -> Option<&Tile> {
        self.tiles().get(id)
    }

    /// Number of indexed tiles
    fn len(&self) -> usize {
        self.tiles().len()
    }

    /// Whether the index holds no tiles
    fn is_empty(&self) -> bool {
        self.tiles().is_empty()
    }
}

/// Which index implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStrategy {
    /// Distance to every tile, stable-sorted
    Linear,
    /// Spatial partitioning with pruned search
    #[default]
    KdTree,
}

/// Build the index chosen by `strategy`
///
/// # Errors
///
/// Returns `EmptyTileSet` if `tiles` is empty
pub fn build_index(strategy: IndexStrategy, tiles: Vec<Tile>) -> Result<Box<dyn ColorIndex>> {
    Ok(match strategy {
        IndexStrategy::Linear => Box::new(LinearIndex::build(tiles)?),
        IndexStrategy::KdTree => Box::new(KdTreeIndex::build(tiles)?),
    })
}

pub(crate) fn ensure_candidates(tiles: &[Tile]) -> Result<()> {
    if tiles.is_empty() {
        Err(MosaicError::NoCandidates)
    } else {
        Ok(())
    }
}
