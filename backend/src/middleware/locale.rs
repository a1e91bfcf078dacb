//! Locale extraction middleware
//!
//! Extracts the locale from the Accept-Language header and stores it in the
//! request extensions for handlers to pick up.

use axum::{
    extract::Request,
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::Response,
};

use crate::utils::extract_locale_from_header;

/// Middleware to extract locale from Accept-Language header
pub async fn locale_middleware(mut req: Request, next: Next) -> Response {
    let locale = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    let locale = extract_locale_from_header(locale);
    req.extensions_mut().insert(locale);

    next.run(req).await
}
