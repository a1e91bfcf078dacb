use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::i18n::DEFAULT_LOCALE;
use crate::services::llm::LLMError;

/// API Error covering every failure a name generation can surface
///
/// Each variant is recovered where it happens and shown to the user as a
/// banner (HTML page) or an `ApiErrorResponse` (JSON API).
#[derive(Error, Debug)]
pub enum ApiError {
    // Input errors 1xxx
    #[error("Name must not be empty")]
    EmptyInput,

    // Upstream completion errors 2xxx
    #[error("Completion request timed out after {secs}s")]
    LlmTimeout { secs: u64 },

    #[error("Completion request failed: {0}")]
    LlmRequest(String),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::EmptyInput => 1001,

            Self::LlmTimeout { .. } => 2001,
            Self::LlmRequest(_) => 2002,
            Self::MalformedResponse(_) => 2003,

            Self::InternalError(_) => 5001,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput => StatusCode::BAD_REQUEST,
            Self::LlmTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::LlmRequest(_) | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Input problems are warnings; everything else is an error banner
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Get localized error message for the given locale
    pub fn localized_message(&self, locale: &str) -> String {
        match self {
            Self::EmptyInput => t!("error.empty_input", locale = locale).to_string(),
            Self::LlmTimeout { .. } => t!("error.timeout", locale = locale).to_string(),
            Self::LlmRequest(message) => {
                t!("error.request_failed", locale = locale, message = message).to_string()
            },
            Self::MalformedResponse(message) => {
                t!("error.generation_failed", locale = locale, message = message).to_string()
            },
            Self::InternalError(message) => {
                t!("error.internal", locale = locale, message = message).to_string()
            },
        }
    }
}

impl From<LLMError> for ApiError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Timeout(secs) => Self::LlmTimeout { secs },
            LLMError::Request(message) => Self::LlmRequest(message),
            LLMError::MalformedResponse(message) => Self::MalformedResponse(message),
            LLMError::EmptyCompletion => {
                Self::MalformedResponse(LLMError::EmptyCompletion.to_string())
            },
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::internal_error(format!("Template rendering error: {}", err))
    }
}

/// Error body returned by the JSON API
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

/// An `ApiError` paired with the locale its message should be rendered in
pub struct LocalizedApiError {
    pub error: ApiError,
    pub locale: String,
}

impl IntoResponse for LocalizedApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            code: self.error.error_code(),
            message: self.error.localized_message(&self.locale),
        };
        (self.error.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        LocalizedApiError { error: self, locale: DEFAULT_LOCALE.to_string() }.into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
