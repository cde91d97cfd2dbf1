//! CLI command definitions for layered-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod dump;
pub mod get;

use crate::config::{Config, ConfigLoader, ConfigPaths};
use crate::format::format_section;
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use dump::DumpArgs;
use get::GetArgs;
use std::path::PathBuf;

/// Inspect layered section/key configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project config directory (default: LAYERED_CONFIG_PROJECT_DIR or .)
    #[arg(short, long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// User config directory (default: LAYERED_CONFIG_USER_DIR or platform config dir)
    #[arg(short, long, global = true)]
    pub user_dir: Option<PathBuf>,

    /// Profile selecting config.<profile>.yaml (default: LAYERED_CONFIG_PROFILE)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Config paths from discovery, with command-line overrides applied.
    pub fn config_paths(&self) -> ConfigPaths {
        let mut paths = ConfigPaths::discover();
        if let Some(ref dir) = self.project_dir {
            paths.project_dir = Some(dir.clone());
        }
        if let Some(ref dir) = self.user_dir {
            paths.user_dir = Some(dir.clone());
        }
        if let Some(ref profile) = self.profile {
            paths.profile = Some(profile.clone());
        }
        paths
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a dotted section.key path (environment overrides apply)
    Get(GetArgs),

    /// List section names
    Sections,

    /// Print the stored keys of one section
    Show(ShowArgs),

    /// Print the merged configuration
    Dump(DumpArgs),
}

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Section name
    pub section: String,
}

/// Load the configuration and run the selected command.
///
/// Returns `false` when a looked-up value was absent.
pub fn run(cli: &Cli) -> Result<bool> {
    let loader = ConfigLoader::load_with_paths(cli.config_paths())?;
    for (tier, path) in loader.loaded_files() {
        tracing::info!(%tier, path = %path.display(), "Using config file");
    }
    let config = loader.into_config();

    match &cli.command {
        Command::Get(args) => get::run_get(&config, args),
        Command::Sections => {
            run_sections(&config);
            Ok(true)
        }
        Command::Show(args) => run_show(&config, args).map(|_| true),
        Command::Dump(args) => dump::run_dump(&config, args).map(|_| true),
    }
}

fn run_sections(config: &Config) {
    for name in config.section_names() {
        println!("{}", name);
    }
}

fn run_show(config: &Config, args: &ShowArgs) -> Result<()> {
    let Some(section) = config.get_section(&args.section) else {
        bail!("Section not found: {}", args.section);
    };
    print!("{}", format_section(section));
    Ok(())
}
