//! Grid decomposition of the target image into tile-sized cells
//!
//! Cells are addressed by `(x, y)` over `[0, columns) x [0, rows)` and are
//! visited column-major: `x` in the outer loop, `y` in the inner loop. Slot
//! history in anti-cluster placement depends on this order.

use crate::io::error::{Result, ensure_extent};
use crate::math::color::Color;
use crate::math::resample::resize_area;
use crate::spatial::tiles::TileSize;
use image::{RgbImage, imageops};
use ndarray::Array2;

/// How partial tiles at the right and bottom edges are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridRounding {
    /// `floor(target / tile)` cells per axis; remainder pixels stay unpainted
    #[default]
    Truncate,
    /// One extra column and row; edge tiles are clipped to the canvas
    Cover,
}

/// One `(x, y)` cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Column index
    pub x: u32,
    /// Row index
    pub y: u32,
}

impl GridCell {
    /// Create a cell
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance between cell coordinates
    pub const fn squared_distance(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }

    /// Top-left canvas pixel of this cell
    pub const fn origin(self, tile_size: TileSize) -> (i64, i64) {
        (
            self.x as i64 * tile_size.width() as i64,
            self.y as i64 * tile_size.height() as i64,
        )
    }
}

/// Number of grid columns and rows covering a target image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    columns: u32,
    rows: u32,
}

impl GridDimensions {
    /// Compute the grid for a target of `target` pixels
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize` if the target is empty or the grid would have
    /// no cells (target smaller than a tile under truncation)
    pub fn for_target(target: (u32, u32), tile_size: TileSize, rounding: GridRounding) -> Result<Self> {
        ensure_extent("target image", target.0, target.1)?;

        let mut columns = target.0 / tile_size.width();
        let mut rows = target.1 / tile_size.height();
        if rounding == GridRounding::Cover {
            columns += 1;
            rows += 1;
        }

        ensure_extent("grid", columns, rows)?;
        Ok(Self { columns, rows })
    }

    /// Number of columns (`tx`)
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (`ty`)
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// The cell visited at position `index` of the column-major walk
    pub const fn cell_at(&self, index: usize) -> Option<GridCell> {
        if index >= self.cell_count() {
            return None;
        }
        let rows = self.rows as usize;
        Some(GridCell::new((index / rows) as u32, (index % rows) as u32))
    }

    /// Column-major iterator over every cell
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + use<> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |x| (0..rows).map(move |y| GridCell::new(x, y)))
    }

    /// Canvas pixels covered by whole cells, `(width, height)`
    pub const fn covered_pixels(&self, tile_size: TileSize) -> (u64, u64) {
        (
            self.columns as u64 * tile_size.width() as u64,
            self.rows as u64 * tile_size.height() as u64,
        )
    }
}

/// Mean color of every grid cell, indexed `[x, y]`
#[derive(Debug, Clone)]
pub struct ColorField {
    colors: Array2<Color>,
}

impl ColorField {
    /// Area-resize the target to one pixel per cell
    ///
    /// When the grid fits inside the target, only the covered top-left region
    /// is resampled, so every entry is exactly the mean of its cell's pixels.
    /// A grid overhanging the target (cover rounding) stretches the whole
    /// target over the cells instead.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize` for an empty target
    pub fn sample(target: &RgbImage, grid: GridDimensions, tile_size: TileSize) -> Result<Self> {
        let (covered_width, covered_height) = grid.covered_pixels(tile_size);
        let fits = covered_width <= u64::from(target.width())
            && covered_height <= u64::from(target.height());

        let coarse = if fits {
            let covered = imageops::crop_imm(target, 0, 0, covered_width as u32, covered_height as u32);
            resize_area(&covered.to_image(), grid.columns, grid.rows)?
        } else {
            resize_area(target, grid.columns, grid.rows)?
        };
        let colors = Array2::from_shape_fn((grid.columns as usize, grid.rows as usize), |(x, y)| {
            Color::from(*coarse.get_pixel(x as u32, y as u32))
        });
        Ok(Self { colors })
    }

    /// Mean color of `cell`, if it lies inside the grid
    pub fn get(&self, cell: GridCell) -> Option<Color> {
        self.colors.get((cell.x as usize, cell.y as usize)).copied()
    }
}
