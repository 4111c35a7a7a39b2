//! Three-dimensional k-d tree over tile colors
//!
//! Nodes split on red, green and blue in turn. Within a split, tiles are
//! ordered by `(channel, insertion position)`, so equal channel values may land
//! on either side. The search therefore only prunes a subtree when its
//! splitting plane is strictly farther than the current k-th best distance,
//! which keeps exact ties (resolved by insertion position) identical to a
//! linear scan.

use crate::index::{ColorIndex, Neighbor, ensure_candidates};
use crate::io::error::{MosaicError, Result};
use crate::math::color::{CHANNELS, Color};
use crate::spatial::tiles::Tile;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Node {
    id: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Spatial index answering k-nearest queries in sublinear average time
#[derive(Debug, Clone, Default)]
pub struct KdTreeIndex {
    tiles: Vec<Tile>,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTreeIndex {
    /// Build the tree once from a non-empty tile pool
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if `tiles` is empty
    pub fn build(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }

        let colors: Vec<Color> = tiles.iter().map(Tile::color).collect();
        let mut ids: Vec<usize> = (0..tiles.len()).collect();
        let mut nodes = Vec::with_capacity(tiles.len());
        let root = build_subtree(&colors, &mut ids, 0, &mut nodes);

        Ok(Self { tiles, nodes, root })
    }

    /// Depth of the deepest leaf (0 for an empty tree)
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], node: Option<usize>) -> usize {
            node.and_then(|index| nodes.get(index))
                .map_or(0, |n| 1 + walk(nodes, n.left).max(walk(nodes, n.right)))
        }
        walk(&self.nodes, self.root)
    }

    fn search(&self, node: Option<usize>, target: Color, k: usize, best: &mut BinaryHeap<Neighbor>) {
        let Some(node) = node.and_then(|index| self.nodes.get(index)) else {
            return;
        };
        let Some(tile) = self.tiles.get(node.id) else {
            return;
        };

        let candidate = Neighbor {
            distance: tile.color().squared_distance(target),
            id: node.id,
        };
        if best.len() < k {
            best.push(candidate);
        } else if best.peek().is_some_and(|worst| candidate < *worst) {
            best.pop();
            best.push(candidate);
        }

        let delta = i32::from(target.channel(node.axis)) - i32::from(tile.color().channel(node.axis));
        let (near, far) = if delta < 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.search(near, target, k, best);

        let plane = delta.unsigned_abs() * delta.unsigned_abs();
        let reachable = best.len() < k || best.peek().is_some_and(|worst| plane <= worst.distance);
        if reachable {
            self.search(far, target, k, best);
        }
    }
}

// Median split on (channel, id); returns the subtree root's node index
fn build_subtree(
    colors: &[Color],
    ids: &mut [usize],
    depth: usize,
    nodes: &mut Vec<Node>,
) -> Option<usize> {
    if ids.is_empty() {
        return None;
    }

    let axis = depth % CHANNELS;
    ids.sort_unstable_by_key(|&id| {
        (
            colors.get(id).map_or(0, |color| color.channel(axis)),
            id,
        )
    });

    let median = ids.len() / 2;
    let (lower, upper) = ids.split_at_mut(median);
    let (&mut id, upper) = upper.split_first_mut()?;

    let index = nodes.len();
    nodes.push(Node {
        id,
        axis,
        left: None,
        right: None,
    });

    let left = build_subtree(colors, lower, depth + 1, nodes);
    let right = build_subtree(colors, upper, depth + 1, nodes);
    if let Some(node) = nodes.get_mut(index) {
        node.left = left;
        node.right = right;
    }

    Some(index)
}

impl ColorIndex for KdTreeIndex {
    fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn nearest(&self, target: Color, k: usize) -> Result<Vec<Neighbor>> {
        ensure_candidates(&self.tiles)?;

        let k = k.min(self.tiles.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut best = BinaryHeap::with_capacity(k + 1);
        self.search(self.root, target, k, &mut best);
        Ok(best.into_sorted_vec())
    }
}
