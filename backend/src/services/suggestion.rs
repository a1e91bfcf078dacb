//! Lenient parser for the model's numbered name list
//!
//! Expected shape, blocks separated by a blank line:
//! ```text
//! 1. Grace
//! 寓意：means elegance
//!
//! 2. Mia
//! 寓意：means bright
//! ```
//! Any number of blocks is accepted; malformed blocks are skipped.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of names the prompts ask for
pub const EXPECTED_SUGGESTIONS: usize = 3;

/// One generated name and its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NameSuggestion {
    pub name: String,
    pub meaning: String,
}

/// Extract name suggestions from raw completion text
pub fn parse_suggestions(text: &str) -> Vec<NameSuggestion> {
    let text = text.replace("\r\n", "\n");

    let suggestions: Vec<NameSuggestion> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .filter_map(parse_block)
        .collect();

    if suggestions.len() != EXPECTED_SUGGESTIONS {
        tracing::debug!(
            count = suggestions.len(),
            expected = EXPECTED_SUGGESTIONS,
            "Completion did not yield the expected number of names"
        );
    }

    suggestions
}

fn parse_block(block: &str) -> Option<NameSuggestion> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 2 {
        return None;
    }

    let name = strip_label(lines[0]);
    if name.is_empty() {
        return None;
    }

    Some(NameSuggestion { name: name.to_string(), meaning: lines[1..].join("\n") })
}

// "1. Grace" -> "Grace"; a line without '.' is taken whole
fn strip_label(line: &str) -> &str {
    match line.find('.') {
        Some(idx) => line[idx + 1..].trim(),
        None => line.trim(),
    }
}
