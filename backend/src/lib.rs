//! Name Bridge
//!
//! Web form that suggests culturally fitting names across Chinese and Latin
//! script by asking a chat-completion model for three candidates.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use services::NameService;

// Locale files live in backend/locales/{zh,en}.yml
rust_i18n::i18n!("locales", fallback = "zh");

/// Shared application state
pub struct AppState {
    pub name_service: NameService,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::names::generate, handlers::names::detect, handlers::names::health),
    components(schemas(
        handlers::names::GenerateReq,
        handlers::names::DetectResp,
        handlers::names::HealthResp,
        services::Generation,
        services::Detection,
        services::script::NameScript,
        services::suggestion::NameSuggestion,
        services::prompt::CacheStats,
        utils::error::ApiErrorResponse,
    )),
    tags(
        (name = "Names", description = "Name generation"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Build the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let api = Router::new()
        .route("/api/names", post(handlers::names::generate))
        .route("/api/detect", get(handlers::names::detect))
        .route("/api/health", get(handlers::names::health))
        .layer(api_cors);

    Router::new()
        .route("/", get(handlers::page::index).post(handlers::page::submit))
        .route("/static/*path", get(handlers::assets::serve_asset))
        .merge(api)
        .layer(axum::middleware::from_fn(middleware::locale_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
