//! Photo mosaic assembly with color-indexed tile selection
//!
//! Candidate images are normalized into fixed-size tiles and indexed by their
//! mean color. The target image is split into a grid; each cell receives a
//! tile chosen among its nearest color matches by an anti-repetition or a
//! randomized placement policy, and the painted canvas is optionally blended
//! with the original target.

#![forbid(unsafe_code)]

/// Mosaic assembly and tile placement policies
pub mod algorithm;
/// Nearest-color indexes over prepared tiles
pub mod index;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color distance and raster resampling
pub mod math;
/// Tiles, tile preparation and grid layout
pub mod spatial;

pub use algorithm::executor::{MosaicBuilder, MosaicConfig, assemble};
pub use io::error::{MosaicError, Result};
