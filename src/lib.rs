//! # wikidata-qa — Graph-to-SPARQL Question Answering Core
//!
//! Translates a semantic graph (the structured representation of a
//! natural-language question) into a SPARQL query over a Wikidata triple
//! store, executes it, and canonicalizes the returned entity ids into
//! human-comparable answer strings.
//!
//! ## Design Principles
//!
//! 1. **Pure compiler**: graph → query text is a deterministic function
//! 2. **Typed clauses**: queries are built as clause IR, serialized once —
//!    edge-index collision-safety is structural, not a convention
//! 3. **Total boundaries**: endpoint faults, missing dictionaries, and
//!    unresolved answers all degrade to valid-but-empty outputs
//! 4. **Explicit construction**: the entity index and the endpoint are
//!    built once and injected — no hidden global state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wikidata_qa::{EndpointConfig, EntityIndex, Pipeline, SparqlEndpoint};
//! use wikidata_qa::graph::{Edge, EdgeType, SemanticGraph};
//!
//! # fn example() -> wikidata_qa::Result<()> {
//! let index = EntityIndex::load_or_empty("data/entity_map.tsv");
//! let endpoint = SparqlEndpoint::new(EndpointConfig::default())?;
//! let pipeline = Pipeline::new(index, endpoint);
//!
//! let graph = SemanticGraph::new(["who", "is", "the", "president", "of", "france", "?"])
//!     .with_edge(
//!         Edge::new()
//!             .with_left([0])
//!             .with_kb_id("P35v")
//!             .with_type(EdgeType::Reverse)
//!             .with_right_kb_id("Q155"),
//!     );
//!
//! for answer in pipeline.answers(&graph) {
//!     println!("{answer}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline Stages
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Compile | `sparql` | Semantic graph → SPARQL text + free variables |
//! | Execute | `execution` | Blocking GET, entity-binding filter |
//! | Canonicalize | `answers` | Entity ids → lower-cased answer strings |

// ============================================================================
// Modules
// ============================================================================

pub mod answers;
pub mod dataset;
pub mod execution;
pub mod graph;
pub mod index;
pub mod sparql;

// ============================================================================
// Re-exports: Graph model (the DTOs)
// ============================================================================

pub use graph::{Argmax, Edge, EdgeType, SemanticGraph};

// ============================================================================
// Re-exports: Execution
// ============================================================================

pub use execution::{Binding, EndpointConfig, SparqlEndpoint};

// ============================================================================
// Re-exports: Index and answers
// ============================================================================

pub use answers::{QUESTION_VARIABLE, canonicalize};
pub use index::EntityIndex;

// ============================================================================
// Top-level Pipeline handle
// ============================================================================

/// The primary entry point. A `Pipeline` wraps a SPARQL endpoint and an
/// entity index and turns semantic graphs into answer strings.
pub struct Pipeline {
    index: EntityIndex,
    endpoint: SparqlEndpoint,
}

impl Pipeline {
    /// Assemble a pipeline from an index and an endpoint built by the
    /// caller.
    pub fn new(index: EntityIndex, endpoint: SparqlEndpoint) -> Self {
        Self { index, endpoint }
    }

    /// Answer a question: compile the graph with the anchor projected,
    /// execute, and canonicalize the anchor's bindings.
    ///
    /// Total by construction — a failing query or an unknown entity yields
    /// an empty answer list, never a fault, so one bad graph cannot abort
    /// a batch evaluation.
    pub fn answers(&self, graph: &SemanticGraph) -> Vec<String> {
        let query = sparql::compile(graph, true);
        let rows = self.endpoint.query_or_empty(&query);
        answers::canonicalize(&rows, QUESTION_VARIABLE, &self.index)
    }

    /// Access the shared entity index.
    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    /// Access the underlying endpoint (for advanced use).
    pub fn endpoint(&self) -> &SparqlEndpoint {
        &self.endpoint
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SPARQL endpoint request failed: {0}")]
    Endpoint(#[from] reqwest::Error),

    #[error("malformed SPARQL result set: {0}")]
    MalformedResults(#[from] serde_json::Error),

    #[error("cannot read entity dictionary {path:?}: {source}")]
    DictionaryIo {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entity dictionary {path:?}, line {line}: expected label<TAB>id")]
    DictionaryFormat { path: std::path::PathBuf, line: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
