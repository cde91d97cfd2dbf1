//! Layered configuration store.
//!
//! A [`Config`] holds named [`Section`]s of string settings. Values are
//! addressed by a dotted `section.key` path, and an environment variable named
//! after the path (`section_key`) overrides any stored value.
//!
//! ## Merge Strategy
//! [`Config::with_merge`] never mutates its operands. The receiver wins; the
//! other config only fills sections and keys that are missing or blank.
//!
//! ## Loading
//! [`ConfigLoader`] reads tiered YAML files (defaults, project, profile, user)
//! and combines them with the same merge, highest tier first.
//!
//! ## Environment Variables
//! - `<section>_<key>` - Overrides `section.key` on lookup
//! - `LAYERED_CONFIG_PROJECT_DIR` - Project config dir (default: `.`)
//! - `LAYERED_CONFIG_USER_DIR` - User config dir (default: platform config dir)
//! - `LAYERED_CONFIG_PROFILE` - Profile selecting `config.<profile>.yaml`

pub mod env;
mod loader;
mod merge;
mod section;
mod store;
pub mod typed;

pub use env::{NoEnv, ProcessEnv, VariableLookup};
pub use loader::{
    ConfigLoader, ConfigPaths, ConfigTier, DEFAULTS_FILE, PROJECT_FILE, load_file,
    load_sections_from_str,
};
pub use merge::{fill_section, merge_sections};
pub use section::{Iter, Section};
pub use store::Config;
pub use typed::TypedGetter;
