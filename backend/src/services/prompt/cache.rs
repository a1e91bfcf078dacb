use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::script::NameScript;

/// Counters exposed on the health endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
struct CacheEntry {
    prompt: Arc<str>,
    last_used: u64,
}

/// Fixed-capacity LRU of built prompts keyed by (text, script)
///
/// Capacity is small (100 by default) so eviction scans for the oldest tick
/// rather than maintaining a linked order.
#[derive(Debug)]
pub struct PromptCache {
    entries: HashMap<(String, NameScript), CacheEntry>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl PromptCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, text: &str, script: NameScript) -> Option<Arc<str>> {
        self.tick += 1;
        let tick = self.tick;
        match self.entries.get_mut(&(text.to_string(), script)) {
            Some(entry) => {
                entry.last_used = tick;
                self.hits += 1;
                Some(Arc::clone(&entry.prompt))
            },
            None => {
                self.misses += 1;
                None
            },
        }
    }

    pub fn insert(&mut self, text: &str, script: NameScript, prompt: Arc<str>) {
        self.tick += 1;
        let key = (text.to_string(), script);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.entries.insert(key, CacheEntry { prompt, last_used: self.tick });
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::debug!(script = ?key.1, "Evicting least recently used prompt");
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(s: &str) -> Arc<str> {
        Arc::from(s)
    }

    #[test]
    fn test_same_text_different_script_are_distinct_keys() {
        let mut cache = PromptCache::new(10);
        cache.insert("Lee", NameScript::Latin, prompt("latin"));
        cache.insert("Lee", NameScript::Chinese, prompt("chinese"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("Lee", NameScript::Latin).as_deref(), Some("latin"));
        assert_eq!(cache.get("Lee", NameScript::Chinese).as_deref(), Some("chinese"));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = PromptCache::new(2);
        cache.insert("a", NameScript::Latin, prompt("A"));
        cache.insert("b", NameScript::Latin, prompt("B"));

        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a", NameScript::Latin).is_some());
        cache.insert("c", NameScript::Latin, prompt("C"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b", NameScript::Latin).is_none());
        assert!(cache.get("a", NameScript::Latin).is_some());
        assert!(cache.get("c", NameScript::Latin).is_some());
    }

    #[test]
    fn test_reinsert_existing_key_does_not_evict() {
        let mut cache = PromptCache::new(2);
        cache.insert("a", NameScript::Latin, prompt("A"));
        cache.insert("b", NameScript::Latin, prompt("B"));
        cache.insert("a", NameScript::Latin, prompt("A2"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a", NameScript::Latin).as_deref(), Some("A2"));
        assert!(cache.get("b", NameScript::Latin).is_some());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = PromptCache::new(100);
        for i in 0..250 {
            cache.insert(&format!("name-{i}"), NameScript::Latin, prompt("p"));
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.capacity(), 100);
        assert!(cache.get("name-249", NameScript::Latin).is_some());
        assert!(cache.get("name-0", NameScript::Latin).is_none());
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut cache = PromptCache::new(3);
        assert!(cache.is_empty());
        assert!(cache.get("x", NameScript::Latin).is_none());
        cache.insert("x", NameScript::Latin, prompt("X"));
        assert!(cache.get("x", NameScript::Latin).is_some());

        assert_eq!(cache.stats(), CacheStats { len: 1, capacity: 3, hits: 1, misses: 1 });
    }
}
