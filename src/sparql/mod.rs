//! # Graph-to-SPARQL Compiler
//!
//! Lowers a [`SemanticGraph`](crate::graph::SemanticGraph) to a SPARQL
//! query over the Wikidata statements/terms graphs.
//! Pure functions — no I/O, no state, no endpoint dependency.
//!
//! The compiler works in two steps: [`lower`] turns the graph into a
//! [`SelectQuery`] of typed clauses, and the renderer serializes that IR to
//! text. [`compile`] and [`free_variables`] share the lowering step, so the
//! variable list the training code sees is exactly the SELECT list of the
//! query that runs.

pub mod clause;
mod render;

use clause::{Clause, LabelClause, ObjectTerm, PredicateTerm, RelationClause, SelectQuery, ShapeSet, Var};

use crate::graph::{Edge, SemanticGraph};

/// IRI namespace of Wikidata entities and relations.
pub const ENTITY_NAMESPACE: &str = "http://www.wikidata.org/entity/";

/// Named graph holding reified subject–predicate–mediator–predicate–object
/// statement triples.
pub(crate) const STATEMENTS_GRAPH: &str = "http://wikidata.org/statements";

/// Named graph holding term labels (`rdfs:label`, `skos:altLabel`).
pub(crate) const TERMS_GRAPH: &str = "http://wikidata.org/terms";

/// Upward relations an object match may hop through: located-in (P131),
/// instance-of (P31), subclass-of (P279), country (P17), part-of (P361).
pub const HOP_UP_RELATIONS: [&str; 5] = ["P131", "P31", "P279", "P17", "P361"];

pub(crate) const PROLOGUE: &str = "\
PREFIX e:<http://www.wikidata.org/entity/>
PREFIX rdfs:<http://www.w3.org/2000/01/rdf-schema#>
PREFIX skos:<http://www.w3.org/2004/02/skos/core#>
PREFIX base:<http://www.wikidata.org/ontology#>
";

/// Compile a semantic graph to SPARQL text.
///
/// Deterministic and total: any graph yields a valid query, with
/// unresolved relations and entities degrading to free variables. When
/// `include_anchor` is true the subject anchor `?e1` is projected so the
/// endpoint returns denotations for it.
pub fn compile(graph: &SemanticGraph, include_anchor: bool) -> String {
    let query = lower(graph, include_anchor);
    tracing::debug!(variables = ?query.select_names(), "compiled semantic graph");
    query.to_string()
}

/// The free-variable names `compile` would project, without rendering text.
///
/// The model-training code uses this to know what remains unresolved after
/// semantic parsing; it must never diverge from the compiled SELECT list.
pub fn free_variables(graph: &SemanticGraph, include_anchor: bool) -> Vec<String> {
    lower(graph, include_anchor).select_names()
}

/// Lower a semantic graph to the typed clause IR.
pub fn lower(graph: &SemanticGraph, include_anchor: bool) -> SelectQuery {
    let mut select = Vec::new();
    let mut clauses = Vec::new();
    let mut order_by = Vec::new();

    for (i, edge) in graph.edge_set.iter().enumerate() {
        let shapes = match edge.edge_type {
            Some(shape) => ShapeSet::One(shape),
            None => ShapeSet::All,
        };

        let predicate = match &edge.kb_id {
            Some(kb_id) => PredicateTerm::Entity(kb_id.clone()),
            None => {
                // One free variable per shape the pattern covers.
                match edge.edge_type {
                    Some(shape) => select.push(Var::Relation(i, shape)),
                    None => select.extend(crate::graph::EdgeType::ALL.map(|s| Var::Relation(i, s))),
                }
                PredicateTerm::Free
            }
        };

        let object = match &edge.right_kb_id {
            Some(id) => ObjectTerm::Entity(id.clone()),
            None => {
                clauses.push(Clause::Label(LabelClause {
                    edge: i,
                    label: title_case(&graph.surface_form(&edge.right)),
                }));
                select.push(Var::Object(i));
                ObjectTerm::Var
            }
        };

        if edge.argmax.is_some() {
            // Joint query-global ordering; the union form records the
            // variable without binding it (see DESIGN.md).
            order_by.push(Var::Time(i));
        }

        clauses.push(Clause::Relation(RelationClause {
            edge: i,
            shapes,
            predicate,
            object,
            hop_up: edge.hop_up,
            time_restricted: edge.argmax.is_some(),
        }));
    }

    if include_anchor {
        select.push(Var::Anchor);
    }

    SelectQuery { select, clauses, order_by }
}

/// Number of free variables a single edge contributes.
pub fn edge_free_variable_count(edge: &Edge) -> usize {
    let relation = if edge.relation_resolved() {
        0
    } else if edge.edge_type.is_some() {
        1
    } else {
        3
    };
    relation + usize::from(!edge.object_resolved())
}

/// Title-case a surface label: a letter is upper-cased when it follows a
/// non-alphabetic character, lower-cased otherwise.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }
    out
}
