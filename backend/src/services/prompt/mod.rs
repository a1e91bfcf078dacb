//! Prompt construction for name generation
//!
//! Two fixed templates, one per input script, each with a single `{name}`
//! placeholder. Building a prompt is pure, so results are memoized in a
//! bounded LRU owned by [`PromptBuilder`].

mod cache;

pub use cache::{CacheStats, PromptCache};

use std::sync::{Arc, Mutex};

use crate::services::script::NameScript;

const CHINESE_NAME_PROMPT: &str = include_str!("chinese_name.md");
const LATIN_NAME_PROMPT: &str = include_str!("latin_name.md");
const PLACEHOLDER: &str = "{name}";

/// Default number of prompts kept in memory
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Build the prompt asking for three names in the opposite script
pub fn build_prompt(text: &str, script: NameScript) -> String {
    let template = match script {
        NameScript::Chinese => CHINESE_NAME_PROMPT,
        NameScript::Latin => LATIN_NAME_PROMPT,
    };
    template.trim_end().replacen(PLACEHOLDER, text, 1)
}

/// Memoizing front of [`build_prompt`]
pub struct PromptBuilder {
    cache: Mutex<PromptCache>,
}

impl PromptBuilder {
    pub fn new(capacity: usize) -> Self {
        Self { cache: Mutex::new(PromptCache::new(capacity)) }
    }

    /// Return the prompt for `(text, script)`, building it on a cache miss
    pub fn prompt_for(&self, text: &str, script: NameScript) -> Arc<str> {
        let Ok(mut cache) = self.cache.lock() else {
            tracing::warn!("Prompt cache lock poisoned, building prompt uncached");
            return Arc::from(build_prompt(text, script));
        };

        if let Some(prompt) = cache.get(text, script) {
            tracing::debug!(script = ?script, "Prompt cache hit");
            return prompt;
        }

        let prompt: Arc<str> = Arc::from(build_prompt(text, script));
        cache.insert(text, script, Arc::clone(&prompt));
        prompt
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.lock().map(|c| c.stats()).unwrap_or_default()
    }
}
