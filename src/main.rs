//! CLI entry point for the photo mosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};
use photomosaic::io::logging::{level_for_flags, setup_logger};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    setup_logger(level_for_flags(cli.quiet, cli.verbose))?;

    let mut runner = MosaicRunner::new(cli);
    runner.run()
}
