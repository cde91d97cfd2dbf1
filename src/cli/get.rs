//! Get subcommand: resolve one dotted path.

use crate::config::{Config, TypedGetter};
use anyhow::Result;
use clap::{Args, ValueEnum};

/// Type the resolved value is coerced to before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueType {
    #[default]
    String,
    Int,
    Float,
    Bool,
    Datetime,
}

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted path such as `app.namespace`
    pub path: String,

    /// Coerce the value before printing
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
    pub value_type: ValueType,
}

/// Resolve `path` to display text, or `None` when absent or not coercible.
pub fn resolve(config: &Config, path: &str, value_type: ValueType) -> Option<String> {
    match value_type {
        ValueType::String => config.get_string(path),
        ValueType::Int => config.get_int(path).map(|v| v.to_string()),
        ValueType::Float => config.get_float(path).map(|v| v.to_string()),
        ValueType::Bool => config.get_bool(path).map(|v| v.to_string()),
        ValueType::Datetime => config.get_date_time(path).map(|v| v.to_rfc3339()),
    }
}

/// Run the get command. Returns `false` when nothing was printed.
pub fn run_get(config: &Config, args: &GetArgs) -> Result<bool> {
    match resolve(config, &args.path, args.value_type) {
        Some(value) => {
            println!("{}", value);
            Ok(true)
        }
        None => {
            tracing::debug!(path = %args.path, "No value");
            Ok(false)
        }
    }
}
