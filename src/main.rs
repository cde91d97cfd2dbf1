//! layered-config
//!
//! Command-line front end for inspecting tiered section/key configuration.

use anyhow::Result;
use clap::Parser;
use layered_config::cli::{Cli, run};
use layered_config::logging::{self, LogTarget};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.verbose, &LogTarget::parse(&cli.log))?;

    if run(&cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
