//! Swerve drive configuration editor CLI.

use clap::Parser;
use swerve_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_documents, run_encode, run_export, run_import, run_verify};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Encode(args) => run_encode(args),
        Command::Export(args) => run_export(args),
        Command::Import(args) => run_import(args),
        Command::Verify(args) => run_verify(args),
        Command::Documents => run_documents(),
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
