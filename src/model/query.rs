//! Validated search query.

use std::fmt;

/// Queries shorter than this (after trimming) are never sent to a provider.
pub const MIN_QUERY_CHARS: usize = 2;

/// Trimmed search text that is long enough to be looked up.
///
/// Smart constructor enforces the minimum length; a `SearchQuery` that
/// exists is always worth sending to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw` and validate its length.
    ///
    /// Returns `None` when the trimmed text has fewer than
    /// [`MIN_QUERY_CHARS`] characters.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for case-insensitive matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_single_character() {
        assert!(SearchQuery::new("").is_none());
        assert!(SearchQuery::new("a").is_none());
        assert!(SearchQuery::new("   ").is_none());
        assert!(SearchQuery::new("  b  ").is_none());
    }

    #[test]
    fn accepts_two_characters_and_trims() {
        let query = SearchQuery::new("  ac ").expect("two chars is enough");
        assert_eq!(query.as_str(), "ac");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // "é" is two bytes but one character
        assert!(SearchQuery::new("é").is_none());
        assert!(SearchQuery::new("éa").is_some());
    }

    #[test]
    fn folded_lowercases() {
        let query = SearchQuery::new("AcMe").unwrap();
        assert_eq!(query.folded(), "acme");
    }
}
