//! Script detection for submitted names
//!
//! A name counts as Chinese when it contains at least one character from the
//! CJK Unified Ideographs block (U+4E00..=U+9FFF). Extension blocks and
//! full-width punctuation are deliberately outside that range.

use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

static CJK_UNIFIED: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"[\x{4E00}-\x{9FFF}]").expect("CJK range pattern is valid")
});

/// Returns true iff `text` contains a CJK Unified Ideograph
pub fn is_chinese(text: &str) -> bool {
    CJK_UNIFIED.is_match(text)
}

/// Writing system of a submitted name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NameScript {
    Chinese,
    Latin,
}

impl NameScript {
    pub fn detect(text: &str) -> Self {
        if is_chinese(text) { Self::Chinese } else { Self::Latin }
    }

    /// Script of the names generated for an input in this script
    pub fn target(self) -> Self {
        match self {
            Self::Chinese => Self::Latin,
            Self::Latin => Self::Chinese,
        }
    }
}
