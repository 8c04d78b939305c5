//! packwork CLI entry point.

use std::io;

use clap::Parser;
use miette::Result;
use packwork_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let mut stdout = io::stdout().lock();
    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(config_args, &mut stdout),
        cli::Command::Classify(classify_args) => {
            commands::classify_execute(classify_args, &mut stdout)
        }
        cli::Command::Name(name_args) => commands::name_execute(name_args, &mut stdout),
    };

    result.map_err(error::cli_error_to_miette)
}
