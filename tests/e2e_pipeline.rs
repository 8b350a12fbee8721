//! End-to-end pipeline tests: dictionary loading, canonicalization, and
//! executor resilience without a live endpoint.

use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wikidata_qa::dataset::gold_answers;
use wikidata_qa::graph::{Edge, EdgeType, SemanticGraph};
use wikidata_qa::{
    Binding, EndpointConfig, EntityIndex, Pipeline, QUESTION_VARIABLE, SparqlEndpoint,
    canonicalize,
};

fn unreachable_endpoint() -> SparqlEndpoint {
    // Connection refused immediately; nothing listens on the discard port.
    SparqlEndpoint::new(
        EndpointConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(300)),
    )
    .unwrap()
}

fn binding(var: &str, id: &str) -> Binding {
    let mut row = Binding::new();
    row.insert(var.to_string(), id.to_string());
    row
}

// ============================================================================
// 1. Dictionary file → index → canonical answers
// ============================================================================

#[test]
fn test_dictionary_to_answers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Barack Obama\tQ76").unwrap();
    writeln!(file, "France\tQ142").unwrap();
    writeln!(file, "Obama\tQ76").unwrap();

    let index = EntityIndex::load(file.path()).unwrap();
    let rows = vec![binding("e1", "Q76"), binding("e1", "Q142")];
    assert_eq!(
        canonicalize(&rows, QUESTION_VARIABLE, &index),
        vec!["barack obama", "obama", "france"]
    );
}

// ============================================================================
// 2. Missing dictionary: raw-id fallback end to end
// ============================================================================

#[test]
fn test_missing_dictionary_falls_back_to_ids() {
    let index = EntityIndex::load_or_empty("/nonexistent/entity_map.tsv");
    assert!(index.is_empty());

    let rows = vec![binding("e1", "Q76"), binding("e1", "Q235234")];
    assert_eq!(
        canonicalize(&rows, QUESTION_VARIABLE, &index),
        vec!["q76", "q235234"]
    );
}

// ============================================================================
// 3. Unreachable endpoint: the pipeline yields zero answers, no fault
// ============================================================================

#[test]
fn test_pipeline_survives_endpoint_fault() {
    let pipeline = Pipeline::new(EntityIndex::empty(), unreachable_endpoint());
    let g = SemanticGraph::new(["who", "is", "the", "president", "of", "france", "?"]).with_edge(
        Edge::new()
            .with_left([0])
            .with_right([5])
            .with_kb_id("P35v")
            .with_type(EdgeType::Reverse)
            .with_right_kb_id("Q155"),
    );

    assert!(pipeline.answers(&g).is_empty());
}

// ============================================================================
// 4. Typed fault stays inspectable below the collapse boundary
// ============================================================================

#[test]
fn test_endpoint_fault_is_typed_internally() {
    let endpoint = unreachable_endpoint();
    let fault = endpoint.query("SELECT DISTINCT ?e1 WHERE {}").unwrap_err();
    assert!(matches!(fault, wikidata_qa::Error::Endpoint(_)));
}

// ============================================================================
// 5. Canonicalized answers compare against extracted gold answers
// ============================================================================

#[test]
fn test_answers_match_gold_after_extraction() {
    let index = EntityIndex::from_pairs([("Barack Obama", "Q76")]);
    let rows = vec![binding("e1", "Q76")];
    let predicted = canonicalize(&rows, QUESTION_VARIABLE, &index);

    let gold: Vec<String> = gold_answers(r#"(list (description "Barack Obama"))"#)
        .into_iter()
        .map(|answer| answer.to_lowercase())
        .collect();
    assert_eq!(predicted, gold);
}
