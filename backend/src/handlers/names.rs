//! Name generation JSON API

use axum::{
    Extension,
    extract::{Json, Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;
use crate::handlers::page::detection_hint;
use crate::services::prompt::CacheStats;
use crate::services::{Detection, Generation};
use crate::utils::Locale;
use crate::utils::error::LocalizedApiError;
#[allow(unused_imports)] // referenced by utoipa response bodies
use crate::utils::error::ApiErrorResponse;

// ============================================================================
// Request/Response
// ============================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateReq {
    /// Chinese or Latin-script name
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetectParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetectResp {
    /// Absent when the name is empty
    pub detection: Option<Detection>,
    /// Localized hint shown under the input while typing
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    pub prompt_cache: CacheStats,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/names
#[utoipa::path(
    post,
    path = "/api/names",
    request_body = GenerateReq,
    responses(
        (status = 200, description = "Generated names", body = Generation),
        (status = 400, description = "Empty name", body = ApiErrorResponse),
        (status = 502, description = "Completion API failed", body = ApiErrorResponse),
        (status = 504, description = "Completion API timed out", body = ApiErrorResponse),
    ),
    tag = "Names"
)]
pub async fn generate(
    State(s): State<Arc<AppState>>,
    Extension(locale): Extension<Locale>,
    Json(req): Json<GenerateReq>,
) -> Result<Json<Generation>, LocalizedApiError> {
    s.name_service
        .generate(&req.name)
        .await
        .map(Json)
        .map_err(|error| LocalizedApiError { error, locale: locale.0 })
}

/// GET /api/detect
#[utoipa::path(
    get,
    path = "/api/detect",
    params(DetectParams),
    responses((status = 200, description = "Script detection", body = DetectResp)),
    tag = "Names"
)]
pub async fn detect(
    State(s): State<Arc<AppState>>,
    Extension(locale): Extension<Locale>,
    Query(params): Query<DetectParams>,
) -> Json<DetectResp> {
    Json(DetectResp {
        detection: s.name_service.detect(&params.name),
        hint: detection_hint(&params.name, locale.as_str()),
    })
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service status", body = HealthResp)),
    tag = "System"
)]
pub async fn health(State(s): State<Arc<AppState>>) -> Json<HealthResp> {
    Json(HealthResp {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: s.name_service.model().to_string(),
        prompt_cache: s.name_service.prompt_cache_stats(),
    })
}
