//! Structured error types for configuration operations.
//!
//! Absence of a value is never an error: lookups return `Option`. The
//! variants here cover rejected mutation attempts and loader failures.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of in-place mutation that was attempted on a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Set,
    Unset,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Set => write!(f, "set"),
            Mutation::Unset => write!(f, "unset"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A caller tried to change a section in place. Use `Section::with` instead.
    #[error("cannot {operation} key '{key}' on immutable section '{section}'; use Section::with")]
    ImmutableMutation {
        section: String,
        key: String,
        operation: Mutation,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    pub fn immutable(section: &str, key: &str, operation: Mutation) -> Self {
        Self::ImmutableMutation {
            section: section.to_string(),
            key: key.to_string(),
            operation,
        }
    }

    /// True for errors caused by an attempted in-place mutation.
    pub fn is_immutable_mutation(&self) -> bool {
        matches!(self, Self::ImmutableMutation { .. })
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
