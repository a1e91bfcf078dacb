//! Wire types and errors for the chat-completion API

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LLMError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Request(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Completion contained no text")]
    EmptyCompletion,
}

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice
    pub fn into_content(self) -> Result<String, LLMError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::MalformedResponse("response contained no choices".into()))?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            Some(_) => Err(LLMError::EmptyCompletion),
            None => Err(LLMError::MalformedResponse("first choice has no message content".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_contract() {
        let req = ChatCompletionRequest {
            model: "deepseek-ai/DeepSeek-V3",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            temperature: 0.7,
            max_tokens: 1000,
            stream: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "deepseek-ai/DeepSeek-V3");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn test_into_content_takes_first_choice() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"1. Grace\n寓意：x"}},
                           {"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_content().unwrap(), "1. Grace\n寓意：x");
    }

    #[test]
    fn test_into_content_rejects_missing_or_blank() {
        let no_choices: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(no_choices.into_content(), Err(LLMError::MalformedResponse(_))));

        let null_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(null_content.into_content(), Err(LLMError::MalformedResponse(_))));

        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  \n"}}]}"#).unwrap();
        assert!(matches!(blank.into_content(), Err(LLMError::EmptyCompletion)));
    }
}
