//! Runtime configuration defaults

// Tile geometry
/// Default tile width in pixels
pub const DEFAULT_TILE_WIDTH: u32 = 24;
/// Default tile height in pixels
pub const DEFAULT_TILE_HEIGHT: u32 = 24;

// Target preprocessing and compositing
/// Default zoom applied to the target before the grid walk
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Default share of the original target blended over the mosaic
pub const DEFAULT_BLEND: f64 = 0.0;

// Placement
/// Default skip probability in noise mode (always take the nearest tile)
pub const DEFAULT_NOISE: f64 = 0.0;
/// Fixed seed for reproducible noise placement
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Number of placed cells between progress bar refreshes
pub const PROGRESS_TICK_INTERVAL: usize = 64;
