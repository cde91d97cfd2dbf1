//! Named, immutable group of string settings.

use super::typed::TypedGetter;
use crate::error::{ConfigError, Mutation, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

/// An immutable, insertion-ordered mapping of keys to raw string values.
///
/// Derived copies are made with [`Section::with`]; the receiver never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Build a section. A repeated key keeps its first position and takes the
    /// last value.
    pub fn new<N, I, K, V>(name: N, entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut section = Self {
            name: name.into(),
            entries: Vec::new(),
        };
        for (key, value) in entries {
            section.insert(key.into(), value.into());
        }
        section
    }

    /// Section with no entries.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value for `key`, or `None` when the key does not exist.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// New section equal to this one except that `key` maps to `value`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Section {
        let mut next = self.clone();
        next.insert(key.into(), value.into());
        next
    }

    /// In-place assignment is not supported; always fails.
    pub fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(ConfigError::immutable(&self.name, key, Mutation::Set))
    }

    /// In-place removal is not supported; always fails.
    pub fn unset(&self, key: &str) -> Result<()> {
        Err(ConfigError::immutable(&self.name, key, Mutation::Unset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn insert(&mut self, key: String, value: String) {
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Iterator over a section's entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TypedGetter for Section {
    fn raw(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
