//! Gap-filling merge for sections.
//!
//! The receiving side always wins. The other side only contributes keys that
//! are missing or blank on the receiver, and whole sections the receiver
//! lacks entirely.

use super::section::Section;
use std::sync::Arc;

/// Fill missing or blank keys of `base` from `fallback`.
///
/// - Keys with a non-empty value in `base` are kept
/// - Keys missing from `base`, or present with `""`, take the fallback value
/// - Keys only in `base` are untouched
///
/// Returns `base` itself (same allocation) when nothing needed filling.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use layered_config::config::{Section, fill_section};
///
/// let base = Arc::new(Section::new("app", [("namespace", "Original"), ("debug", "")]));
/// let fallback = Section::new("app", [("namespace", "Other"), ("debug", "1"), ("extra", "v")]);
/// let merged = fill_section(&base, &fallback);
///
/// assert_eq!(merged.get("namespace"), Some("Original"));
/// assert_eq!(merged.get("debug"), Some("1"));
/// assert_eq!(merged.get("extra"), Some("v"));
/// ```
pub fn fill_section(base: &Arc<Section>, fallback: &Section) -> Arc<Section> {
    let mut merged: Option<Section> = None;

    for (key, value) in fallback {
        let current = merged.as_ref().unwrap_or(base.as_ref());
        let keep = current.get(key).is_some_and(|v| !v.is_empty());
        if !keep {
            merged = Some(current.with(key, value));
        }
    }

    match merged {
        Some(section) => Arc::new(section),
        None => Arc::clone(base),
    }
}

/// Merge ordered section lists: `base` wins, `fallback` fills gaps.
///
/// Sections are matched by name. Sections of `base` keep their positions;
/// sections only in `fallback` are appended in `fallback`'s order.
pub fn merge_sections(base: &[Arc<Section>], fallback: &[Arc<Section>]) -> Vec<Arc<Section>> {
    let mut merged: Vec<Arc<Section>> = base.to_vec();

    for other in fallback {
        match merged.iter().position(|s| s.name() == other.name()) {
            Some(i) => {
                let filled = fill_section(&merged[i], other);
                merged[i] = filled;
            }
            None => merged.push(Arc::clone(other)),
        }
    }

    merged
}
