// Common test utilities and helpers

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::services::NameService;
use crate::services::llm::{CompletionClient, LLMError};
use crate::{AppState, build_router};

/// In-process `CompletionClient` that records prompts and replays a fixed reply
pub struct StubClient {
    reply: Result<String, LLMError>,
    prompts: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing(err: LLMError) -> Self {
        Self { reply: Err(err), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log poisoned").len()
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().expect("prompt log poisoned").push(prompt.to_string());
        self.reply.clone()
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

/// Build the full router around a stub client
pub fn test_app(client: Arc<StubClient>) -> axum::Router {
    let state = Arc::new(AppState { name_service: NameService::new(client, 100) });
    build_router(state)
}
