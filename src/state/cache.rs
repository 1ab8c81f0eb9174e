//! Query → result set cache.
//!
//! Bounded with LRU eviction; a capacity of 0 keeps every entry until
//! [`ResultCache::clear`].

use crate::model::{ResultSet, SearchQuery};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached queries.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Cache of successful lookups keyed by query.
pub struct ResultCache {
    entries: LruCache<SearchQuery, ResultSet>,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` queries (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        let entries = match NonZeroUsize::new(capacity) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    /// Look up a query, marking it most recently used.
    pub fn get(&mut self, query: &SearchQuery) -> Option<&ResultSet> {
        self.entries.get(query)
    }

    /// Whether a query is cached, without touching LRU order.
    pub fn contains(&self, query: &SearchQuery) -> bool {
        self.entries.contains(query)
    }

    /// Store the result set under its own query.
    pub fn insert(&mut self, results: ResultSet) {
        self.entries.put(results.query().clone(), results);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("len", &self.entries.len())
            .field("cap", &self.entries.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TenantMatch;

    fn results(q: &str) -> ResultSet {
        ResultSet::new(
            SearchQuery::new(q).unwrap(),
            vec![TenantMatch::new(q, q)],
        )
    }

    fn query(q: &str) -> SearchQuery {
        SearchQuery::new(q).unwrap()
    }

    #[test]
    fn insert_then_get() {
        let mut cache = ResultCache::new(4);
        cache.insert(results("acme"));

        let hit = cache.get(&query("acme")).expect("cached");
        assert_eq!(hit.len(), 1);
        assert!(cache.get(&query("globex")).is_none());
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ResultCache::new(2);
        cache.insert(results("aa"));
        cache.insert(results("bb"));
        cache.get(&query("aa"));
        cache.insert(results("cc"));

        assert!(cache.contains(&query("aa")));
        assert!(!cache.contains(&query("bb")), "bb was least recently used");
        assert!(cache.contains(&query("cc")));
    }

    #[test]
    fn zero_capacity_is_unbounded() {
        let mut cache = ResultCache::new(0);
        for i in 0..1000 {
            cache.insert(results(&format!("q{i}")));
        }
        assert_eq!(cache.len(), 1000);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = ResultCache::default();
        cache.insert(results("aa"));
        cache.insert(results("bb"));
        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.contains(&query("aa")));
    }
}
