//! Internationalization utilities for the backend
//!
//! This module provides locale extraction from HTTP requests. The resolved
//! locale travels with the request as an extension (see `middleware::locale`).

/// Supported locales
pub const SUPPORTED_LOCALES: &[&str] = &["zh", "en"];
pub const DEFAULT_LOCALE: &str = "zh";

/// Locale resolved for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

/// Normalize locale string to supported format
/// Accepts: "zh", "zh-CN", "zh_CN", "en", "en-US", "en_US", etc.
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale
        .split(['-', '_', ',', ';'])
        .next()
        .unwrap_or(DEFAULT_LOCALE);

    // Map to supported locale
    if primary.starts_with("zh") {
        "zh".to_string()
    } else if primary.starts_with("en") {
        "en".to_string()
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> Locale {
    match header_value {
        Some(value) => Locale(normalize_locale(value)),
        None => Locale::default(),
    }
}
