//! Answer canonicalization.
//!
//! Turns filtered query bindings into lower-cased answer strings that are
//! comparable against gold answers. Lookup goes through the shared
//! [`EntityIndex`]; an id the index does not know falls back to the raw id
//! itself.

use crate::execution::Binding;
use crate::index::EntityIndex;

/// Binding key of the subject anchor variable (`?e1` in the query, `e1` in
/// the result set).
pub const QUESTION_VARIABLE: &str = "e1";

/// Map bindings of `variable` to canonical answer strings.
///
/// An id known to the index fans out to **every** label recorded for it;
/// an unknown id is emitted as itself. All output is lower-cased. Rows that
/// do not bind `variable` contribute nothing.
pub fn canonicalize(rows: &[Binding], variable: &str, index: &EntityIndex) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(variable))
        .flat_map(|id| match index.labels(id) {
            Some(labels) => labels.iter().map(|label| label.to_lowercase()).collect::<Vec<_>>(),
            None => vec![id.to_lowercase()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(var: &str, id: &str) -> Binding {
        let mut row = Binding::new();
        row.insert(var.to_string(), id.to_string());
        row
    }

    #[test]
    fn test_known_id_maps_to_label() {
        let index = EntityIndex::from_pairs([("Barack Obama", "Q76")]);
        let rows = vec![row("e1", "Q76")];
        assert_eq!(canonicalize(&rows, "e1", &index), ["barack obama"]);
    }

    #[test]
    fn test_unknown_id_falls_back_lowercased() {
        let rows = vec![row("e1", "Q76"), row("e1", "Q235234")];
        let index = EntityIndex::from_pairs([("Barack Obama", "Q76")]);
        assert_eq!(
            canonicalize(&rows, "e1", &index),
            ["barack obama", "q235234"]
        );
    }

    #[test]
    fn test_empty_index_always_falls_back() {
        let rows = vec![row("e1", "Q76")];
        assert_eq!(canonicalize(&rows, "e1", &EntityIndex::empty()), ["q76"]);
    }

    #[test]
    fn test_multi_label_id_fans_out() {
        let index = EntityIndex::from_pairs([("Barack Obama", "Q76"), ("Obama", "Q76")]);
        let rows = vec![row("e1", "Q76")];
        assert_eq!(
            canonicalize(&rows, "e1", &index),
            ["barack obama", "obama"]
        );
    }

    #[test]
    fn test_row_without_variable_is_skipped() {
        let rows = vec![row("e20", "Q76")];
        assert!(canonicalize(&rows, "e1", &EntityIndex::empty()).is_empty());
    }
}
