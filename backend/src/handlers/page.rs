//! Server-rendered form page
//!
//! `GET /` shows the form, prefilled with its detection hint when `?name=` is
//! given. `POST /` runs one generation and renders the outcome. The last successful completion travels back with the form as
//! `previous`, so a failed attempt can keep showing the earlier cards.

use askama::Template;
use axum::{
    Extension, Form,
    extract::{Query, State},
    response::Html,
};
use chrono::Datelike;
use rust_i18n::t;
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::services::Generation;
use crate::services::script::NameScript;
use crate::services::suggestion::{NameSuggestion, parse_suggestions};
use crate::utils::{ApiResult, Locale};

// ============================================================================
// View model
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub name: String,
    /// Raw text of the last successful completion shown on the page
    #[serde(default)]
    pub previous: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "banner-success",
            Self::Warning => "banner-warning",
            Self::Error => "banner-error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// Localized static text of the page
pub struct PageLabels {
    pub title: String,
    pub intro: String,
    pub feature_chinese: String,
    pub feature_latin: String,
    pub input_label: String,
    pub input_placeholder: String,
    pub submit: String,
    pub generating: String,
    pub footer: String,
}

impl PageLabels {
    fn new(locale: &str, model: &str) -> Self {
        let year = chrono::Local::now().year();
        Self {
            title: t!("page.title", locale = locale).to_string(),
            intro: t!("page.intro", locale = locale).to_string(),
            feature_chinese: t!("page.feature_chinese", locale = locale).to_string(),
            feature_latin: t!("page.feature_latin", locale = locale).to_string(),
            input_label: t!("page.input_label", locale = locale).to_string(),
            input_placeholder: t!("page.input_placeholder", locale = locale).to_string(),
            submit: t!("page.submit", locale = locale).to_string(),
            generating: t!("page.generating", locale = locale).to_string(),
            footer: t!("page.footer", locale = locale, year = year, model = model).to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub lang: String,
    pub labels: PageLabels,
    pub name: String,
    pub hint: Option<String>,
    pub banner: Option<Banner>,
    pub suggestions: Vec<NameSuggestion>,
    /// Raw completion text behind `suggestions`, echoed into the form
    pub previous: String,
}

/// What the page shows after a submission
#[derive(Debug)]
pub struct PageOutcome {
    pub banner: Banner,
    pub suggestions: Vec<NameSuggestion>,
    pub previous: String,
}

impl PageOutcome {
    /// Success replaces the cards; any failure keeps the previous ones
    pub fn from_result(result: ApiResult<Generation>, previous: Option<&str>, locale: &str) -> Self {
        match result {
            Ok(generation) => Self {
                banner: Banner {
                    kind: BannerKind::Success,
                    message: t!("page.success", locale = locale).to_string(),
                },
                suggestions: generation.suggestions,
                previous: generation.raw,
            },
            Err(err) => {
                let previous = previous.unwrap_or_default();
                Self {
                    banner: Banner {
                        kind: if err.is_warning() { BannerKind::Warning } else { BannerKind::Error },
                        message: err.localized_message(locale),
                    },
                    suggestions: parse_suggestions(previous),
                    previous: previous.to_string(),
                }
            },
        }
    }
}

/// Localized "detected ... name" line, `None` for blank input
pub fn detection_hint(name: &str, locale: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let hint = match NameScript::detect(name) {
        NameScript::Chinese => t!("page.detected_chinese", locale = locale, name = name),
        NameScript::Latin => t!("page.detected_latin", locale = locale, name = name),
    };
    Some(hint.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn index(
    State(s): State<Arc<AppState>>,
    Extension(locale): Extension<Locale>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Html<String>> {
    let page = IndexTemplate {
        lang: locale.0.clone(),
        labels: PageLabels::new(locale.as_str(), s.name_service.model()),
        hint: detection_hint(&query.name, locale.as_str()),
        name: query.name,
        banner: None,
        suggestions: Vec::new(),
        previous: String::new(),
    };
    Ok(Html(page.render()?))
}

/// POST /
pub async fn submit(
    State(s): State<Arc<AppState>>,
    Extension(locale): Extension<Locale>,
    Form(form): Form<PageForm>,
) -> ApiResult<Html<String>> {
    let result = s.name_service.generate(&form.name).await;
    let outcome = PageOutcome::from_result(result, form.previous.as_deref(), locale.as_str());

    let page = IndexTemplate {
        lang: locale.0.clone(),
        labels: PageLabels::new(locale.as_str(), s.name_service.model()),
        hint: detection_hint(&form.name, locale.as_str()),
        name: form.name,
        banner: Some(outcome.banner),
        suggestions: outcome.suggestions,
        previous: outcome.previous,
    };
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ApiError;

    const PREVIOUS: &str = "1. Grace\n寓意：means elegance\n\n2. Mia\n寓意：means bright";

    fn generation(raw: &str) -> Generation {
        Generation {
            query: "李雷".to_string(),
            script: NameScript::Chinese,
            suggestions: parse_suggestions(raw),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn test_success_replaces_previous_cards() {
        let raw = "1. Leo\n寓意：雷的谐音";
        let outcome = PageOutcome::from_result(Ok(generation(raw)), Some(PREVIOUS), "zh");

        assert_eq!(outcome.banner.kind, BannerKind::Success);
        assert_eq!(outcome.banner.message, "名字生成成功！");
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.suggestions[0].name, "Leo");
        assert_eq!(outcome.previous, raw);
    }

    #[test]
    fn test_timeout_keeps_previous_cards() {
        let outcome =
            PageOutcome::from_result(Err(ApiError::LlmTimeout { secs: 30 }), Some(PREVIOUS), "zh");

        assert_eq!(outcome.banner.kind, BannerKind::Error);
        assert_eq!(outcome.banner.message, "请求超时，请稍后重试。");
        assert_eq!(outcome.suggestions, parse_suggestions(PREVIOUS));
        assert_eq!(outcome.previous, PREVIOUS);
    }

    #[test]
    fn test_empty_input_is_a_warning() {
        let outcome = PageOutcome::from_result(Err(ApiError::EmptyInput), None, "en");

        assert_eq!(outcome.banner.kind, BannerKind::Warning);
        assert_eq!(outcome.banner.message, "Please enter a name first");
        assert!(outcome.suggestions.is_empty());
        assert!(outcome.previous.is_empty());
    }

    #[test]
    fn test_detection_hint() {
        assert_eq!(detection_hint("  ", "zh"), None);
        assert_eq!(
            detection_hint("李雷", "zh").unwrap(),
            "检测到中文名：李雷，将为您生成匹配的英文名"
        );
        assert!(detection_hint("John", "en").unwrap().contains("Chinese names will be generated"));
    }

    #[test]
    fn test_template_escapes_model_output() {
        let page = IndexTemplate {
            lang: "en".to_string(),
            labels: PageLabels::new("en", "test-model"),
            name: "<b>x</b>".to_string(),
            hint: None,
            banner: None,
            suggestions: vec![NameSuggestion {
                name: "<script>alert(1)</script>".to_string(),
                meaning: "寓意：a & b".to_string(),
            }],
            previous: String::new(),
        };
        let html = page.render().unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("test-model"));
    }
}
