//! Color arithmetic and raster resampling utilities

/// Representative colors and squared Euclidean distance
pub mod color;
/// Area-averaging resize, centered crop, blending and zoom
pub mod resample;

pub use color::Color;
