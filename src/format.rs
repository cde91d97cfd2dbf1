//! Output formatting for resolved configuration.

use crate::config::{Config, Section};
use anyhow::Result;
use clap::ValueEnum;

/// Output format for dumped configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render every section of `config` as a nested mapping.
///
/// Stored values only; environment overrides are not applied.
pub fn render_config(config: &Config, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(config)?;
            json.push('\n');
            json
        }
    };
    Ok(text)
}

/// Format a section as `key = value` lines.
pub fn format_section(section: &Section) -> String {
    let mut out = String::new();
    for (key, value) in section {
        out.push_str(&format!("{} = {}\n", key, value));
    }
    out
}
