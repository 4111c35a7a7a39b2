//! Command-line interface for building a photo mosaic from a target and a tile pool

use crate::algorithm::executor::{MosaicBuilder, MosaicConfig};
use crate::algorithm::placement::PolicyConfig;
use crate::index::IndexStrategy;
use crate::io::configuration::{
    DEFAULT_BLEND, DEFAULT_NOISE, DEFAULT_SEED, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
    DEFAULT_ZOOM, PROGRESS_TICK_INTERVAL,
};
use crate::io::error::Result;
use crate::io::image::{load_target, load_tiles_with, save_image};
use crate::io::progress::ProgressManager;
use crate::spatial::grid::GridRounding;
use crate::spatial::tiles::{TilePreparer, TileSize};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Compose a target image out of many smaller tile images",
    after_help = "Provide many tile images for a better effect, e.g. tiles/*.jpg"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// The bigger image to build the mosaic on
    #[arg(short, long, value_name = "TARGET")]
    pub target: PathBuf,

    /// Zoom applied to the target image before tiling
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Width of each tile in pixels
    #[arg(short = 'x', long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: u32,

    /// Height of each tile in pixels
    #[arg(short = 'y', long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: u32,

    /// Rotate among the N nearest matches to avoid clusters (anti-cluster mode)
    #[arg(short, long, value_name = "N", conflicts_with = "noise")]
    pub nearest: Option<usize>,

    /// Probability of skipping a match for a farther one (noise mode)
    #[arg(long, default_value_t = DEFAULT_NOISE)]
    pub noise: f64,

    /// Blend factor with the original image (0 = pure mosaic, 1 = original)
    #[arg(short, long, default_value_t = DEFAULT_BLEND)]
    pub blend: f64,

    /// Output mosaic image file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Random seed for reproducible noise placement
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Add one extra column and row so edge remainders are covered
    #[arg(long)]
    pub cover_remainder: bool,

    /// Use an exhaustive scan instead of the k-d tree
    #[arg(long)]
    pub linear_index: bool,

    /// Suppress progress output and informational logs
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debugging details
    #[arg(short, long)]
    pub verbose: bool,

    /// Images to build the mosaic from
    #[arg(value_name = "TILE", required = true, num_args = 1..)]
    pub tiles: Vec<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Placement mode implied by the supplied options
    pub const fn policy(&self) -> PolicyConfig {
        match self.nearest {
            Some(nearest) => PolicyConfig::AntiCluster { nearest },
            None => PolicyConfig::Noise { noise: self.noise },
        }
    }

    /// Assemble and validate the mosaic configuration
    ///
    /// # Errors
    ///
    /// Returns `DegenerateSize`, `InvalidPolicyConfig` or `InvalidParameter`
    /// for unusable settings
    pub fn mosaic_config(&self) -> Result<MosaicConfig> {
        let tile_size = TileSize::new(self.tile_width, self.tile_height)?;
        let config = MosaicConfig {
            blend: self.blend,
            rounding: if self.cover_remainder {
                GridRounding::Cover
            } else {
                GridRounding::Truncate
            },
            index: if self.linear_index {
                IndexStrategy::Linear
            } else {
                IndexStrategy::KdTree
            },
            ..MosaicConfig::new(tile_size, self.policy())
        };
        config.validate()?;
        Ok(config)
    }
}

/// Runs one mosaic build end to end with optional progress display
pub struct MosaicRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Parsed arguments
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    fn tick(&self) {
        if let Some(ref pm) = self.progress_manager {
            pm.tick();
        }
    }

    /// Load inputs, build the mosaic and save it
    ///
    /// Nothing is written unless the whole mosaic was built.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, loading, preparation, placement or
    /// export error
    pub fn run(&mut self) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.mosaic_config()?;

        let target = load_target(&self.cli.target, self.cli.zoom)?;
        info!(
            "Target {} is {}x{}",
            self.cli.target.display(),
            target.width(),
            target.height()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase("Loading", self.cli.tiles.len());
        }
        let raws = load_tiles_with(&self.cli.tiles, || self.tick())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase("Preparing", raws.len());
        }
        let tiles = TilePreparer::new(config.tile_size).prepare_all_with(&raws, || self.tick())?;
        drop(raws);

        let mut builder = MosaicBuilder::new(tiles, target, &config, self.cli.seed)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase("Placing", builder.total_cells());
        }

        while builder.place_next()? {
            let placed = builder.placed_cells();
            if placed % PROGRESS_TICK_INTERVAL == 0 {
                if let Some(ref pm) = self.progress_manager {
                    pm.set_position(placed);
                }
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.set_position(builder.placed_cells());
        }
        let mosaic = builder.finish()?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
            for (phase, elapsed) in pm.completed_phases() {
                info!("{phase} took {elapsed:.2?}");
            }
        }

        save_image(&mosaic, &self.cli.output)?;
        info!(
            "Wrote {} ({}x{}) in {:.2?}",
            self.cli.output.display(),
            mosaic.width(),
            mosaic.height(),
            start_time.elapsed()
        );

        Ok(())
    }
}
