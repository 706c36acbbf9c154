//! Memo of compiled per-title regexes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use regex_lite::Regex;
use tracing::warn;

/// Default bound on memoized patterns.
pub const DEFAULT_PATTERN_CAPACITY: usize = 4096;

/// Read-through memo of compiled patterns, keyed by the pattern source.
///
/// Inserts are idempotent: two callers racing on the same key may both
/// compile, and whichever insert lands first is kept. Once `capacity`
/// entries are held, new sources are compiled but not remembered.
#[derive(Debug)]
pub struct PatternCache {
    patterns: RwLock<HashMap<String, Arc<Regex>>>,
    capacity: usize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PATTERN_CAPACITY)
    }
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            patterns: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Get the compiled form of `source`, compiling and memoizing on miss.
    ///
    /// Returns `None` only if the source fails to compile, which cannot
    /// happen for sources built from `regex_lite::escape`d input.
    pub fn get(&self, source: &str) -> Option<Arc<Regex>> {
        if let Ok(patterns) = self.patterns.read() {
            if let Some(regex) = patterns.get(source) {
                return Some(Arc::clone(regex));
            }
        }

        let compiled = match Regex::new(source) {
            Ok(regex) => Arc::new(regex),
            Err(e) => {
                warn!(pattern = source, error = %e, "Failed to compile pattern");
                return None;
            }
        };

        match self.patterns.write() {
            Ok(mut patterns) => {
                if let Some(existing) = patterns.get(source) {
                    return Some(Arc::clone(existing));
                }
                if patterns.len() < self.capacity {
                    patterns.insert(source.to_string(), Arc::clone(&compiled));
                }
                Some(compiled)
            }
            // A poisoned memo only costs us recompilation.
            Err(_) => Some(compiled),
        }
    }

    /// Number of memoized patterns.
    pub fn len(&self) -> usize {
        self.patterns.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pattern matching `word` as a whole token of normalized text.
///
/// Normalized text only ever separates tokens with single spaces, so a
/// token boundary is a space or either end of the string.
pub fn word_boundary_source(word: &str) -> String {
    format!("(?:^| ){}(?: |$)", regex_lite::escape(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_memoizes() {
        let cache = PatternCache::new();
        assert!(cache.is_empty());

        let a = cache.get(&word_boundary_source("silo")).unwrap();
        let b = cache.get(&word_boundary_source("silo")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.get(&word_boundary_source("bad")).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_word_boundary_source() {
        let cache = PatternCache::new();
        let re = cache.get(&word_boundary_source("silo")).unwrap();

        assert!(re.is_match("silo s01e01"));
        assert!(re.is_match("the silo"));
        assert!(re.is_match("a silo b"));
        assert!(!re.is_match("grain silos of america"));
        assert!(!re.is_match("missilo"));
    }

    #[test]
    fn test_escapes_metacharacters() {
        let cache = PatternCache::new();
        let re = cache.get(&word_boundary_source("c++")).unwrap();
        assert!(re.is_match("learn c++ now"));
        assert!(!re.is_match("learn cccc now"));
    }

    #[test]
    fn test_invalid_source() {
        let cache = PatternCache::new();
        assert!(cache.get("(unclosed").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_bounds_memo() {
        let cache = PatternCache::with_capacity(2);
        for word in ["silo", "dune", "bad", "office"] {
            let re = cache.get(&word_boundary_source(word)).unwrap();
            assert!(re.is_match(word));
        }
        assert_eq!(cache.len(), 2);

        // Held entries are still shared.
        let a = cache.get(&word_boundary_source("silo")).unwrap();
        let b = cache.get(&word_boundary_source("silo")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_population() {
        let cache = Arc::new(PatternCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for word in ["silo", "breaking", "bad", "office"] {
                        let re = cache.get(&word_boundary_source(word)).unwrap();
                        assert!(re.is_match(word), "thread {} lost {}", i, word);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
