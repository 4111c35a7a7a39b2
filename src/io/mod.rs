/// Command-line parsing and the end-to-end mosaic runner
pub mod cli;
/// Default values for runtime parameters
pub mod configuration;
/// Error taxonomy and validation helpers
pub mod error;
/// Image loading, zoom and export
pub mod image;
/// Logger installation
pub mod logging;
/// Progress display for long-running phases
pub mod progress;
