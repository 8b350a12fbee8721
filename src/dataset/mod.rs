//! WebQuestions gold-answer extraction.
//!
//! Gold answers arrive as an s-expression-like target value,
//! `(list (description "X") (description Y) ...)`; evaluation compares the
//! pipeline's canonicalized answers against the extracted descriptions.

use std::sync::LazyLock;

use regex::Regex;

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\(description "?(.*?)"?\)"#).unwrap());

/// Extract the ordered description contents from a target value, stripping
/// surrounding quotes.
pub fn gold_answers(target_value: &str) -> Vec<String> {
    DESCRIPTION
        .captures_iter(target_value)
        .map(|captures| captures[1].to_string())
        .collect()
}
