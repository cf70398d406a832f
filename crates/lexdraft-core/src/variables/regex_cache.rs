//! Bounded cache of compiled validation patterns

use std::num::NonZeroUsize;
use std::sync::LazyLock;

use lru::LruCache;
use regex::Regex;

/// `(x+)+`, `(x*)*`, `(x+){n}` and similar nested quantifiers
static NESTED_QUANTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^()]*[+*][^()]*\)\s*[+*{]").expect("Invalid nested quantifier regex")
});

/// True when `pattern` is short enough and free of nested quantifiers
pub fn is_safe_pattern(pattern: &str, max_length: usize) -> bool {
    pattern.len() <= max_length && !NESTED_QUANTIFIER.is_match(pattern)
}

pub struct RegexCache {
    cache: LruCache<String, Regex>,
    max_pattern_length: usize,
}

impl RegexCache {
    pub fn new(capacity: usize, max_pattern_length: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            max_pattern_length,
        }
    }

    /// Compiled form of `pattern`, or `None` when it is unsafe or invalid
    pub fn get(&mut self, pattern: &str) -> Option<&Regex> {
        if !self.cache.contains(pattern) {
            if !is_safe_pattern(pattern, self.max_pattern_length) {
                tracing::warn!(pattern = %pattern, "rejecting unsafe validation pattern");
                return None;
            }
            let regex = match Regex::new(pattern) {
                Ok(regex) => regex,
                Err(err) => {
                    tracing::warn!(pattern = %pattern, error = %err, "invalid validation pattern");
                    return None;
                }
            };
            if let Some((evicted, _)) = self.cache.push(pattern.to_string(), regex) {
                tracing::debug!(pattern = %evicted, "evicted compiled pattern");
            }
        }
        self.cache.get(pattern)
    }

    /// Rejected patterns never match
    pub fn is_match(&mut self, pattern: &str, text: &str) -> bool {
        self.get(pattern).is_some_and(|regex| regex.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .finish()
    }
}
