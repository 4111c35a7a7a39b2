//! Mosaic assembly: grid walk, per-cell tile placement and final blend

use crate::{
    algorithm::placement::{PlacementPolicy, PolicyConfig},
    index::{ColorIndex, IndexStrategy, build_index},
    io::configuration::DEFAULT_BLEND,
    io::error::{MosaicError, Result, ensure_unit_interval, invalid_parameter},
    math::resample::blend,
    spatial::grid::{ColorField, GridCell, GridDimensions, GridRounding},
    spatial::tiles::{Tile, TilePreparer, TileSize},
};
use bitvec::vec::BitVec;
use image::{RgbImage, imageops};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters of one mosaic build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicConfig {
    /// Size of every tile and grid cell
    pub tile_size: TileSize,
    /// Placement mode
    pub policy: PolicyConfig,
    /// Share of the original target blended over the mosaic, in [0, 1]
    pub blend: f64,
    /// Edge handling for targets that are not a multiple of the tile size
    pub rounding: GridRounding,
    /// Color index implementation
    pub index: IndexStrategy,
}

impl MosaicConfig {
    /// Configuration with the given tile size and policy and default
    /// blend, rounding and index
    pub fn new(tile_size: TileSize, policy: PolicyConfig) -> Self {
        Self {
            tile_size,
            policy,
            blend: DEFAULT_BLEND,
            rounding: GridRounding::default(),
            index: IndexStrategy::default(),
        }
    }

    /// Check every parameter before any work is done
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicyConfig` or `InvalidParameter` for the first
    /// invalid setting
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        ensure_unit_interval("blend", self.blend)?;
        Ok(())
    }
}

/// Tile chosen for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Cell that was painted
    pub cell: GridCell,
    /// Insertion position of the tile in the pool
    pub tile: usize,
}

/// Stepwise mosaic builder owning the index, policy state and canvas
///
/// Cells are painted one per [`Self::place_next`] call in column-major order.
pub struct MosaicBuilder<R: Rng> {
    index: Box<dyn ColorIndex>,
    policy: PlacementPolicy<R>,
    target: RgbImage,
    field: ColorField,
    grid: GridDimensions,
    tile_size: TileSize,
    blend: f64,
    canvas: RgbImage,
    used_tiles: BitVec,
    placements: Vec<Placement>,
}

impl MosaicBuilder<StdRng> {
    /// Create a builder whose noise draws come from a seeded generator
    ///
    /// # Errors
    ///
    /// See [`MosaicBuilder::with_rng`]
    pub fn new(tiles: Vec<Tile>, target: RgbImage, config: &MosaicConfig, seed: u64) -> Result<Self> {
        Self::with_rng(tiles, target, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MosaicBuilder<R> {
    /// Create a builder with an explicit random source
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - `tiles` is empty
    /// - A tile does not have the configured tile size
    /// - The target is empty or smaller than one tile under truncation
    pub fn with_rng(tiles: Vec<Tile>, target: RgbImage, config: &MosaicConfig, rng: R) -> Result<Self> {
        config.validate()?;
        if tiles.is_empty() {
            return Err(MosaicError::EmptyTileSet);
        }

        let expected = config.tile_size.dimensions();
        if let Some(tile) = tiles.iter().find(|tile| tile.image().dimensions() != expected) {
            let (width, height) = tile.image().dimensions();
            return Err(invalid_parameter(
                "tile",
                &format!("{width}x{height}"),
                &format!("must be {}x{}", expected.0, expected.1),
            ));
        }

        let grid = GridDimensions::for_target(target.dimensions(), config.tile_size, config.rounding)?;
        let (covered_width, covered_height) = grid.covered_pixels(config.tile_size);
        if covered_width < u64::from(target.width()) || covered_height < u64::from(target.height()) {
            warn!(
                "Grid {}x{} leaves {}x{} target pixels uncovered",
                grid.columns(),
                grid.rows(),
                u64::from(target.width()).saturating_sub(covered_width),
                u64::from(target.height()).saturating_sub(covered_height)
            );
        }

        let field = ColorField::sample(&target, grid, config.tile_size)?;
        let pool_size = tiles.len();
        let index = build_index(config.index, tiles)?;
        let policy = PlacementPolicy::new(config.policy, pool_size, rng)?;
        let canvas = RgbImage::new(target.width(), target.height());

        info!(
            "Assembling {}x{} grid from {pool_size} tiles ({:?} index, {:?})",
            grid.columns(),
            grid.rows(),
            config.index,
            config.policy
        );

        Ok(Self {
            index,
            policy,
            target,
            field,
            grid,
            tile_size: config.tile_size,
            blend: config.blend,
            canvas,
            used_tiles: BitVec::repeat(false, pool_size),
            placements: Vec::with_capacity(grid.cell_count()),
        })
    }

    /// Grid being painted
    pub const fn grid(&self) -> GridDimensions {
        self.grid
    }

    /// Total number of cells to paint
    pub const fn total_cells(&self) -> usize {
        self.grid.cell_count()
    }

    /// Number of cells painted so far
    pub fn placed_cells(&self) -> usize {
        self.placements.len()
    }

    /// Placements made so far, in walk order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Color index built from the tile pool
    pub fn index(&self) -> &dyn ColorIndex {
        self.index.as_ref()
    }

    /// Number of distinct pool tiles placed so far
    pub fn distinct_tiles_used(&self) -> usize {
        self.used_tiles.count_ones()
    }

    /// Placement policy and its state
    pub const fn policy(&self) -> &PlacementPolicy<R> {
        &self.policy
    }

    /// Canvas as painted so far, before blending
    pub const fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Paint the next cell of the walk
    ///
    /// Returns `false` once every cell has been painted.
    ///
    /// # Errors
    ///
    /// Propagates index and policy errors
    pub fn place_next(&mut self) -> Result<bool> {
        let Some(cell) = self.grid.cell_at(self.placements.len()) else {
            return Ok(false);
        };

        let target = self.field.get(cell).ok_or(MosaicError::DegenerateSize {
            subject: "color field",
            width: self.grid.columns(),
            height: self.grid.rows(),
        })?;
        let tile_id = self.policy.select(self.index.as_ref(), cell, target)?;
        let tile = self.index.tile(tile_id).ok_or(MosaicError::NoCandidates)?;

        let (x, y) = cell.origin(self.tile_size);
        imageops::replace(&mut self.canvas, tile.image(), x, y);
        if let Some(mut bit) = self.used_tiles.get_mut(tile_id) {
            *bit = true;
        }
        self.placements.push(Placement { cell, tile: tile_id });

        Ok(true)
    }

    /// Paint every remaining cell
    ///
    /// # Errors
    ///
    /// Propagates the first placement error
    pub fn place_all(&mut self) -> Result<()> {
        while self.place_next()? {}
        Ok(())
    }

    /// Paint any remaining cells and blend the canvas with the target
    ///
    /// # Errors
    ///
    /// Propagates placement and blending errors
    pub fn finish(mut self) -> Result<RgbImage> {
        self.place_all()?;
        info!(
            "Painted {} cells using {} of {} tiles",
            self.placements.len(),
            self.distinct_tiles_used(),
            self.used_tiles.len()
        );
        debug!("Blending with factor {}", self.blend);
        blend(&self.canvas, &self.target, self.blend)
    }
}

/// Prepare raw tile images and assemble a mosaic of `target`
///
/// Uses a generator seeded with `seed` for noise mode.
///
/// # Errors
///
/// Returns `EmptyTileSet` for an empty pool and propagates preparation,
/// index and placement errors unchanged
pub fn assemble(raw_tiles: &[RgbImage], target: &RgbImage, config: &MosaicConfig, seed: u64) -> Result<RgbImage> {
    config.validate()?;
    if raw_tiles.is_empty() {
        return Err(MosaicError::EmptyTileSet);
    }

    let tiles = TilePreparer::new(config.tile_size).prepare_all(raw_tiles)?;
    MosaicBuilder::new(tiles, target.clone(), config, seed)?.finish()
}
