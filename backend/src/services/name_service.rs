//! Name generation flow: validate → classify → prompt → complete → parse

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::services::llm::CompletionClient;
use crate::services::prompt::{CacheStats, PromptBuilder};
use crate::services::script::NameScript;
use crate::services::suggestion::{NameSuggestion, parse_suggestions};
use crate::utils::{ApiError, ApiResult};

/// Result of one successful generation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Generation {
    pub query: String,
    pub script: NameScript,
    pub suggestions: Vec<NameSuggestion>,
    /// Raw completion text, kept so a page can re-render these cards later
    pub raw: String,
}

/// Script verdict for a (possibly partial) input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Detection {
    pub name: String,
    pub script: NameScript,
    pub target: NameScript,
}

pub struct NameService {
    prompts: PromptBuilder,
    client: Arc<dyn CompletionClient>,
}

impl NameService {
    pub fn new(client: Arc<dyn CompletionClient>, prompt_cache_capacity: usize) -> Self {
        Self { prompts: PromptBuilder::new(prompt_cache_capacity), client }
    }

    /// Generate three names for `input` in the opposite script
    ///
    /// Empty input is rejected before any network call.
    pub async fn generate(&self, input: &str) -> ApiResult<Generation> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ApiError::EmptyInput);
        }

        let request_id = uuid::Uuid::new_v4();
        let script = NameScript::detect(query);
        let prompt = self.prompts.prompt_for(query, script);

        tracing::info!(%request_id, script = ?script, "Generating names");
        let start = Instant::now();

        let raw = match self.client.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Name generation failed: {}",
                    e
                );
                return Err(e.into());
            },
        };

        let suggestions = parse_suggestions(&raw);
        tracing::info!(
            %request_id,
            count = suggestions.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Names generated"
        );

        Ok(Generation { query: query.to_string(), script, suggestions, raw })
    }

    pub fn detect(&self, input: &str) -> Option<Detection> {
        let name = input.trim();
        if name.is_empty() {
            return None;
        }
        let script = NameScript::detect(name);
        Some(Detection { name: name.to_string(), script, target: script.target() })
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn prompt_cache_stats(&self) -> CacheStats {
        self.prompts.stats()
    }
}
