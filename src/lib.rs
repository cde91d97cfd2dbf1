//! Layered configuration store.
//!
//! Named sections of string settings, dotted-path lookup with environment
//! overrides, typed accessors, and immutable gap-filling merges.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use config::{Config, ConfigLoader, Section, TypedGetter};
pub use error::{ConfigError, Result};
