//! Tile normalization and representative color extraction
//!
//! Every candidate image is cropped to the tile's aspect ratio around its
//! center and area-resized to the configured tile size, so tiles are never
//! stretched. The tile's color is the mean of its prepared pixels.

use crate::io::error::{MosaicError, Result, ensure_extent};
use crate::math::color::Color;
use crate::math::resample::{crop_centered, mean_color, resize_area};
use image::RgbImage;
use log::debug;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Pixel dimensions shared by every tile of one mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    width: u32,
    height: u32,
}

impl TileSize {
    /// Create a tile size
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize` if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        ensure_extent("tile", width, height)?;
        Ok(Self { width, height })
    }

    /// Tile width in pixels
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Tile height in pixels
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Size as a `(width, height)` pair
    pub const fn dimensions(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A prepared tile image annotated with its representative color
///
/// Immutable once prepared; its image always has the configured tile size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    color: Color,
    image: RgbImage,
}

impl Tile {
    /// Representative (mean) color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Prepared raster
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// Turns raw candidate images into tiles of one fixed size
#[derive(Debug, Clone, Copy)]
pub struct TilePreparer {
    tile_size: TileSize,
}

impl TilePreparer {
    /// Create a preparer for the given tile size
    pub const fn new(tile_size: TileSize) -> Self {
        Self { tile_size }
    }

    /// Size every prepared tile will have
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Crop and resize a raw image into a tile and compute its color
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize` if the source image is empty
    pub fn prepare(&self, raw: &RgbImage) -> Result<Tile> {
        let image = self.crop_to_fit(raw)?;
        let color = mean_color(&image)?;
        Ok(Tile { color, image })
    }

    /// Decode raw bytes and prepare the result
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if the bytes cannot be decoded, otherwise
    /// the errors of [`Self::prepare`]
    pub fn prepare_from_bytes(&self, bytes: &[u8]) -> Result<Tile> {
        let raw = image::load_from_memory(bytes)
            .map_err(|source| MosaicError::UnsupportedFormat { path: None, source })?
            .to_rgb8();
        self.prepare(&raw)
    }

    /// Prepare a whole tile pool in parallel, preserving input order
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` for an empty pool and the first preparation
    /// error otherwise
    pub fn prepare_all(&self, raws: &[RgbImage]) -> Result<Vec<Tile>> {
        self.prepare_all_with(raws, || {})
    }

    /// [`Self::prepare_all`], calling `on_prepared` after each tile
    ///
    /// # Errors
    ///
    /// See [`Self::prepare_all`]
    pub fn prepare_all_with<F>(&self, raws: &[RgbImage], on_prepared: F) -> Result<Vec<Tile>>
    where
        F: Fn() + Sync,
    {
        if raws.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }

        let tiles = raws
            .par_iter()
            .map(|raw| {
                let tile = self.prepare(raw)?;
                on_prepared();
                Ok(tile)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Prepared {} tiles at {}x{}",
            tiles.len(),
            self.tile_size.width,
            self.tile_size.height
        );
        Ok(tiles)
    }

    /// Centered crop with the tile's aspect ratio, resized to the tile size
    ///
    /// The scale reference is the axis with the smaller source-to-tile ratio,
    /// which keeps the crop inside the source on both axes.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize` if the source image is empty
    pub fn crop_to_fit(&self, raw: &RgbImage) -> Result<RgbImage> {
        ensure_extent("source image", raw.width(), raw.height())?;

        let (tile_width, tile_height) = self.tile_size.dimensions();
        let factor = crop_factor(raw.dimensions(), self.tile_size);
        let crop_width = (f64::from(tile_width) * factor).round() as u32;
        let crop_height = (f64::from(tile_height) * factor).round() as u32;

        let cropped = crop_centered(raw, crop_width, crop_height);
        resize_area(&cropped, tile_width, tile_height)
    }
}

/// Ratio between source and tile along the less-stretched axis
///
/// This is always the smaller of the two ratios. Picking the axis whose
/// ratio is closer to 1 instead would, for a source smaller than the tile,
/// select the larger ratio and ask for a crop wider or taller than the
/// source itself.
pub fn crop_factor(source: (u32, u32), tile_size: TileSize) -> f64 {
    let horizontal = f64::from(source.0) / f64::from(tile_size.width);
    let vertical = f64::from(source.1) / f64::from(tile_size.height);
    horizontal.min(vertical)
}
