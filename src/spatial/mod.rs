//! Spatial data structures for mosaic layout
//!
//! This module contains spatial-related functionality including:
//! - Tile sizes, prepared tiles and tile preparation
//! - Grid dimensions, cell addressing and walk order
//! - Per-cell mean colors of the target image

/// Grid decomposition and per-cell color sampling
pub mod grid;
/// Tile normalization and representative colors
pub mod tiles;

pub use grid::{GridCell, GridDimensions, GridRounding};
pub use tiles::{Tile, TileSize};
