//! Lookup functions over the static label table.

use serde::Serialize;

use super::table::LABELS;
use crate::common::error::{Error, Result};

/// Static description of one content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    /// Stable identifier, e.g. `"png"`
    pub label: &'static str,
    pub mime_type: &'static str,
    /// Coarse family such as `image`, `archive`, `code`
    pub group: &'static str,
    pub description: &'static str,
    /// Canonical extension first
    pub extensions: &'static [&'static str],
    pub is_text: bool,
    /// Tie-break rank; lower is more specific and wins
    pub priority: u16,
}

/// Resolve a label identifier.
///
/// An identifier missing from the table means the model and the registry
/// come from different versions; the caller gets [`Error::UnknownLabel`].
///
/// # Examples
///
/// ```
/// use filekind::labels::lookup;
///
/// let png = lookup("png").unwrap();
/// assert_eq!(png.mime_type, "image/png");
/// assert!(lookup("no-such-type").is_err());
/// ```
pub fn lookup(label: &str) -> Result<&'static LabelEntry> {
    LABELS
        .get(label)
        .ok_or_else(|| Error::UnknownLabel(label.to_string()))
}

/// Whether `label` is in the table.
#[inline]
pub fn contains(label: &str) -> bool {
    LABELS.contains_key(label)
}

/// All entries, most specific first.
pub fn entries() -> Vec<&'static LabelEntry> {
    let mut all: Vec<_> = LABELS.values().collect();
    all.sort_by_key(|entry| entry.priority);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{DIRECTORY, EMPTY, TXT, UNKNOWN};
    use std::collections::HashSet;

    #[test]
    fn test_keys_match_labels() {
        for (key, entry) in LABELS.entries() {
            assert_eq!(*key, entry.label);
        }
    }

    #[test]
    fn test_priorities_unique() {
        let mut seen = HashSet::new();
        for entry in LABELS.values() {
            assert!(seen.insert(entry.priority), "duplicate priority for {}", entry.label);
        }
    }

    #[test]
    fn test_generic_labels_rank_last() {
        let ordered = entries();
        let specific_max = ordered
            .iter()
            .filter(|e| ![TXT, UNKNOWN, EMPTY, DIRECTORY].contains(&e.label))
            .map(|e| e.priority)
            .max()
            .unwrap();
        for generic in [TXT, UNKNOWN] {
            assert!(lookup(generic).unwrap().priority > specific_max);
        }
    }

    #[test]
    fn test_catch_all_entries_present() {
        assert!(lookup(TXT).unwrap().is_text);
        assert!(!lookup(UNKNOWN).unwrap().is_text);
        assert!(contains(EMPTY));
        assert!(contains(DIRECTORY));
    }

    #[test]
    fn test_extensions_are_bare_and_lowercase() {
        for entry in LABELS.values() {
            for ext in entry.extensions {
                assert!(!ext.starts_with('.'), "{}: {}", entry.label, ext);
                assert_eq!(*ext, ext.to_ascii_lowercase());
            }
        }
    }

    #[test]
    fn test_unknown_label_error() {
        match lookup("definitely-not-a-label") {
            Err(Error::UnknownLabel(label)) => assert_eq!(label, "definitely-not-a-label"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_entries_sorted() {
        let ordered = entries();
        assert_eq!(ordered.len(), LABELS.len());
        assert!(ordered.windows(2).all(|w| w[0].priority < w[1].priority));
    }
}
