//! Configuration loader with tier-based merging.
//!
//! Reads YAML files shaped as `section -> key -> scalar` from several tiers
//! and combines them so that higher tiers win and lower tiers fill gaps.

use super::section::Section;
use super::store::Config;
use crate::error::{ConfigError, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the project tier.
pub const PROJECT_FILE: &str = "config.yaml";
/// File name of the defaults tier.
pub const DEFAULTS_FILE: &str = "config.default.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Shipped defaults: `config.default.yaml` in the project directory
    Defaults = 0,
    /// Project config: `config.yaml` in the project directory
    Project = 1,
    /// Profile config: `config.<profile>.yaml` in the project directory
    Profile = 2,
    /// User config: `config.yaml` in the user directory
    User = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::Profile => write!(f, "profile"),
            ConfigTier::User => write!(f, "user"),
        }
    }
}

/// Directories and profile used to locate tier files.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Directory holding defaults, project and profile files
    pub project_dir: Option<PathBuf>,
    /// Directory holding the per-user file
    pub user_dir: Option<PathBuf>,
    /// Profile name selecting `config.<profile>.yaml`
    pub profile: Option<String>,
}

impl ConfigPaths {
    /// Discover paths from the environment and platform defaults.
    pub fn discover() -> Self {
        // Project dir: LAYERED_CONFIG_PROJECT_DIR or $CWD
        let project_dir = std::env::var("LAYERED_CONFIG_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(".")));

        // User dir: LAYERED_CONFIG_USER_DIR or <platform config dir>/layered-config
        let user_dir = std::env::var("LAYERED_CONFIG_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("layered-config")));

        let profile = std::env::var("LAYERED_CONFIG_PROFILE")
            .ok()
            .filter(|p| !p.is_empty());

        Self {
            project_dir,
            user_dir,
            profile,
        }
    }

    /// Create paths with explicit directories and no profile.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
            profile: None,
        }
    }

    /// Select a profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Candidate files, highest tier first.
    pub fn tier_files(&self) -> Vec<(ConfigTier, PathBuf)> {
        let mut files = Vec::new();

        if let Some(ref user_dir) = self.user_dir {
            files.push((ConfigTier::User, user_dir.join(PROJECT_FILE)));
        }

        if let Some(ref project_dir) = self.project_dir {
            if let Some(ref profile) = self.profile {
                files.push((
                    ConfigTier::Profile,
                    project_dir.join(format!("config.{profile}.yaml")),
                ));
            }
            files.push((ConfigTier::Project, project_dir.join(PROJECT_FILE)));
            files.push((ConfigTier::Defaults, project_dir.join(DEFAULTS_FILE)));
        }

        files
    }
}

/// Parse a YAML document into sections.
///
/// Keys and values are taken as their source text, so `1.10` stays `"1.10"`
/// and `0x1F` stays `"0x1F"`. A `null` value becomes `""`. Sequences and
/// nested mappings below the key level are rejected. `origin` names the
/// source in error messages. An empty document yields no sections.
pub fn load_sections_from_str(yaml: &str, origin: &str) -> Result<Vec<Section>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: Option<SectionList> = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    Ok(doc
        .map(|list| {
            list.0
                .into_iter()
                .map(|(name, entries)| Section::new(name, entries))
                .collect()
        })
        .unwrap_or_default())
}

/// Top-level document: section name to key/value pairs, in file order.
struct SectionList(Vec<(String, Vec<(String, String)>)>);

/// Keys of one section, in file order.
struct SectionEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for SectionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = SectionList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of section names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut sections = Vec::new();
                while let Some((name, entries)) = map.next_entry::<String, Option<SectionEntries>>()? {
                    sections.push((name, entries.map(|e| e.0).unwrap_or_default()));
                }
                Ok(SectionList(sections))
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}

impl<'de> Deserialize<'de> for SectionEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SectionEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of keys to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                // Option<String> keeps null apart; String takes the scalar's source text.
                while let Some((key, value)) = map.next_entry::<String, Option<String>>()? {
                    entries.push((key, value.unwrap_or_default()));
                }
                Ok(SectionEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Load a single YAML file into a `Config`.
pub fn load_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sections = load_sections_from_str(&content, &path.display().to_string())?;
    debug!(path = %path.display(), sections = sections.len(), "Loaded config file");
    Ok(Config::new(sections))
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Merged configuration
    config: Config,
    /// Files that contributed, highest tier first
    loaded: Vec<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    /// Load configuration from all discovered tiers.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit paths.
    ///
    /// Missing tier files are skipped. A file that exists but cannot be read
    /// or parsed is an error.
    ///
    /// Sections are listed in the order the lowest tier declares them, then
    /// sections first introduced by higher tiers, so adding a user or profile
    /// file never reorders the defaults. Keys within a section follow the
    /// highest tier that defines the section, with filled keys after them.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        let mut config = Config::empty();
        let mut loaded = Vec::new();

        if let Some(ref profile) = paths.profile {
            if let Some(ref project_dir) = paths.project_dir {
                let profile_file = project_dir.join(format!("config.{profile}.yaml"));
                if !profile_file.exists() {
                    warn!(
                        profile = %profile,
                        path = %profile_file.display(),
                        "Profile config not found"
                    );
                }
            }
        }

        // Section names per tier, highest tier first.
        let mut tier_names: Vec<Vec<String>> = Vec::new();

        // Highest tier first: each lower tier only fills gaps.
        for (tier, path) in paths.tier_files() {
            if !path.is_file() {
                debug!(%tier, path = %path.display(), "Skipping missing config file");
                continue;
            }
            let tier_config = load_file(&path)?;
            tier_names.push(
                tier_config
                    .section_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            );
            config = config.with_merge(&tier_config);
            loaded.push((tier, path));
        }

        // Lowest tier's order is the base; higher tiers append new sections.
        let mut order: Vec<String> = Vec::new();
        for name in tier_names.into_iter().rev().flatten() {
            if !order.contains(&name) {
                order.push(name);
            }
        }
        let config = config.ordered_by(&order);

        Ok(Self {
            paths,
            config,
            loaded,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Files that were read, highest tier first.
    pub fn loaded_files(&self) -> &[(ConfigTier, PathBuf)] {
        &self.loaded
    }

}
