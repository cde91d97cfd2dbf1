//! Dump subcommand: print the merged configuration.

use crate::config::Config;
use crate::format::{OutputFormat, render_config};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the dump subcommand
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run the dump command.
pub fn run_dump(config: &Config, args: &DumpArgs) -> Result<()> {
    let text = render_config(config, args.format)?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote config");
        }
        None => print!("{}", text),
    }
    Ok(())
}
