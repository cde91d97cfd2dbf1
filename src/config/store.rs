//! Collection of sections with dotted-path lookup and environment override.

use super::env::{ProcessEnv, VariableLookup, env_name_for};
use super::merge::merge_sections;
use super::section::Section;
use super::typed::TypedGetter;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable set of named sections.
///
/// At most one section is held per name. Lookups through [`Config::get`] let
/// an environment variable named after the path (dots replaced by
/// underscores) shadow the stored value.
#[derive(Clone)]
pub struct Config {
    sections: Vec<Arc<Section>>,
    lookup: Arc<dyn VariableLookup>,
}

impl Config {
    /// Build a config backed by the process environment.
    ///
    /// When two sections share a name the later one replaces the earlier one,
    /// keeping the earlier one's position.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        Self::from_shared(sections.into_iter().map(Arc::new))
    }

    /// Config with no sections.
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<Section>())
    }

    /// Build from sections that may already be shared with another config.
    pub fn from_shared(sections: impl IntoIterator<Item = Arc<Section>>) -> Self {
        let mut held: Vec<Arc<Section>> = Vec::new();
        for section in sections {
            match held.iter().position(|s| s.name() == section.name()) {
                Some(i) => {
                    debug!(section = section.name(), "Replacing duplicate section");
                    held[i] = section;
                }
                None => held.push(section),
            }
        }
        Self {
            sections: held,
            lookup: Arc::new(ProcessEnv),
        }
    }

    /// Replace the environment lookup used by [`Config::get`].
    pub fn with_lookup(mut self, lookup: impl VariableLookup + 'static) -> Self {
        self.lookup = Arc::new(lookup);
        self
    }

    /// Resolve a dotted `section.key` path.
    ///
    /// 1. A non-empty environment variable named `section_key` wins.
    /// 2. Otherwise the path is split on its first `.`, and the remainder is
    ///    looked up in the named section.
    ///
    /// Returns `None` for a path without a `.`, an empty key, an unknown
    /// section or a missing key.
    pub fn get(&self, path: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.lookup.lookup(&env_name_for(path)) {
            if !value.is_empty() {
                return Some(Cow::Owned(value));
            }
        }

        let (section_name, key) = path.split_once('.')?;
        if key.is_empty() {
            return None;
        }
        self.get_section(section_name)?.get(key).map(Cow::Borrowed)
    }

    /// Section by name. No environment override applies.
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Names of all sections in order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name()).collect()
    }

    /// Same sections rearranged: those named in `order` first, in that
    /// order, then the rest in their current order. Sections stay shared.
    pub(crate) fn ordered_by(&self, order: &[String]) -> Config {
        let mut sections: Vec<Arc<Section>> = order
            .iter()
            .filter_map(|name| self.sections.iter().find(|s| s.name() == name))
            .cloned()
            .collect();
        for section in &self.sections {
            if !order.iter().any(|name| name == section.name()) {
                sections.push(Arc::clone(section));
            }
        }
        Config {
            sections,
            lookup: Arc::clone(&self.lookup),
        }
    }

    /// Merge without mutation: this config wins, `other` fills the gaps.
    ///
    /// Sections missing here are adopted from `other`. For sections present
    /// in both, each key of `other` is copied only where this config has no
    /// value or an empty one. Neither operand changes. The result keeps this
    /// config's environment lookup.
    pub fn with_merge(&self, other: &Config) -> Config {
        debug!(
            base = self.sections.len(),
            fallback = other.sections.len(),
            "Merging config"
        );
        Config {
            sections: merge_sections(&self.sections, &other.sections),
            lookup: Arc::clone(&self.lookup),
        }
    }

    /// Merge `other` into this config in place.
    ///
    /// Requires exclusive access; callers sharing a config across threads must
    /// synchronize around it.
    #[deprecated(since = "0.2.0", note = "use Config::with_merge for an immutable merge")]
    pub fn merge(&mut self, other: &Config) {
        warn!(
            target: "layered_config::deprecated",
            "Config::merge() is deprecated. Use Config::with_merge() for an immutable merge."
        );
        let merged = self.with_merge(other);
        self.sections = merged.sections;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Config {
    /// Compares stored sections only; the environment lookup is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .zip(&other.sections)
                .all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

impl TypedGetter for Config {
    fn raw(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.name(), section.as_ref())?;
        }
        map.end()
    }
}
