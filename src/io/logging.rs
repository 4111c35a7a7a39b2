//! Colored, timestamped log output on stderr

use crate::io::error::Result;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Map the quiet / verbose command-line flags to a level for this crate
pub const fn level_for_flags(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger
///
/// Dependencies log at `Warn`; this crate logs at `level`.
///
/// # Errors
///
/// Returns `LoggerInit` if a global logger is already installed
pub fn setup_logger(level: LevelFilter) -> Result<()> {
    let colors = ColoredLevelConfig::default()
        .info(Color::Green)
        .debug(Color::BrightMagenta)
        .trace(Color::BrightBlue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}][{:<5}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .level(LevelFilter::Warn)
        .level_for(env!("CARGO_CRATE_NAME"), level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
