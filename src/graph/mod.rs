//! # Semantic Graph Model
//!
//! Clean DTOs for the semantic representation of a question: an ordered
//! edge set over the question's tokens, produced upstream by the semantic
//! parser and handed over as JSON.
//!
//! Design rule: NO query text, NO endpoint types here. This module is pure
//! data — no I/O, no state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Token-index span anchoring an entity to the question's surface form.
pub type TokenSpan = SmallVec<[usize; 4]>;

/// A semantic graph: the question's tokens plus an ordered set of edges.
///
/// Edge order is significant — the position of an edge in `edge_set` is the
/// index used to namespace every query variable that edge introduces.
/// `entities` carries the parser's entity spans and is informational only;
/// the compiler never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticGraph {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default, rename = "edgeSet")]
    pub edge_set: Vec<Edge>,
    #[serde(default)]
    pub entities: Vec<Vec<usize>>,
}

impl SemanticGraph {
    pub fn new(tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            edge_set: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge_set.push(edge);
        self
    }

    /// Surface form of a token span: the in-range tokens joined by spaces.
    ///
    /// Out-of-range indices are skipped rather than failing — a malformed
    /// span degrades to whatever part of it still anchors to the question.
    pub fn surface_form(&self, span: &[usize]) -> String {
        let words: Vec<&str> = span
            .iter()
            .filter_map(|&i| self.tokens.get(i))
            .map(String::as_str)
            .collect();
        words.join(" ")
    }
}

/// One edge of the semantic graph: a relation between the question's
/// subject entity and one object entity.
///
/// Every field except the anchoring spans is optional — the semantic parser
/// resolves relations and entities incrementally, and an edge it could not
/// resolve compiles to free query variables instead of constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Token indices anchoring the subject entity.
    #[serde(default)]
    pub left: TokenSpan,
    /// Token indices anchoring the object entity's surface label. Used only
    /// when `right_kb_id` is absent.
    #[serde(default)]
    pub right: TokenSpan,
    /// Resolved relation identifier (statement-value form, e.g. `P35v`).
    #[serde(rename = "kbID", default, skip_serializing_if = "Option::is_none")]
    pub kb_id: Option<String>,
    /// Structural shape of the resolved relation triple. Meaningful only
    /// when `kb_id` is present; when absent all three shapes are unioned.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<EdgeType>,
    /// Resolved object-entity identifier (e.g. `Q155`).
    #[serde(rename = "rightkbID", default, skip_serializing_if = "Option::is_none")]
    pub right_kb_id: Option<String>,
    /// Reach the object transitively through one of the whitelisted
    /// "broader" relations instead of matching it directly.
    #[serde(rename = "hopUp", default, skip_serializing_if = "std::ops::Not::not")]
    pub hop_up: bool,
    /// Keep only the extremal match by the given qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argmax: Option<Argmax>,
}

impl Edge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_left(mut self, span: impl IntoIterator<Item = usize>) -> Self {
        self.left = span.into_iter().collect();
        self
    }

    pub fn with_right(mut self, span: impl IntoIterator<Item = usize>) -> Self {
        self.right = span.into_iter().collect();
        self
    }

    pub fn with_kb_id(mut self, kb_id: impl Into<String>) -> Self {
        self.kb_id = Some(kb_id.into());
        self
    }

    pub fn with_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = Some(edge_type);
        self
    }

    pub fn with_right_kb_id(mut self, right_kb_id: impl Into<String>) -> Self {
        self.right_kb_id = Some(right_kb_id.into());
        self
    }

    pub fn with_hop_up(mut self) -> Self {
        self.hop_up = true;
        self
    }

    pub fn with_argmax(mut self, argmax: Argmax) -> Self {
        self.argmax = Some(argmax);
        self
    }

    /// A resolved relation contributes no relation free variables.
    pub fn relation_resolved(&self) -> bool {
        self.kb_id.is_some()
    }

    /// A resolved object contributes no object free variable.
    pub fn object_resolved(&self) -> bool {
        self.right_kb_id.is_some()
    }
}

/// The three structural shapes a reified relation triple can take between
/// the subject anchor and the object entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    /// subject → statement → object
    Direct,
    /// object → statement → subject
    Reverse,
    /// statement → object, statement → subject
    VStructure,
}

impl EdgeType {
    pub const ALL: [EdgeType; 3] = [EdgeType::Direct, EdgeType::Reverse, EdgeType::VStructure];

    /// Single-letter marker suffixed to free relation variables (`?r0d`).
    pub fn marker(self) -> char {
        match self {
            EdgeType::Direct => 'd',
            EdgeType::Reverse => 'r',
            EdgeType::VStructure => 'v',
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeType::Direct => write!(f, "direct"),
            EdgeType::Reverse => write!(f, "reverse"),
            EdgeType::VStructure => write!(f, "v-structure"),
        }
    }
}

/// Extremal-match selector. Only the time qualifier is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argmax {
    Time,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_external_field_names() {
        let json = r#"{
            "tokens": ["who", "is", "the", "president", "of", "france", "?"],
            "edgeSet": [{
                "left": [0],
                "right": [5],
                "kbID": "P35v",
                "type": "reverse",
                "rightkbID": "Q155",
                "argmax": "time"
            }],
            "entities": [[5]]
        }"#;
        let g: SemanticGraph = serde_json::from_str(json).unwrap();
        assert_eq!(g.tokens.len(), 7);
        assert_eq!(g.edge_set.len(), 1);
        let edge = &g.edge_set[0];
        assert_eq!(edge.kb_id.as_deref(), Some("P35v"));
        assert_eq!(edge.edge_type, Some(EdgeType::Reverse));
        assert_eq!(edge.right_kb_id.as_deref(), Some("Q155"));
        assert!(!edge.hop_up);
        assert_eq!(edge.argmax, Some(Argmax::Time));
        assert_eq!(g.entities, vec![vec![5]]);
    }

    #[test]
    fn test_deserialize_minimal_edge() {
        let g: SemanticGraph =
            serde_json::from_str(r#"{"edgeSet": [{"left": [0], "right": [6]}]}"#).unwrap();
        let edge = &g.edge_set[0];
        assert!(edge.kb_id.is_none());
        assert!(edge.edge_type.is_none());
        assert!(edge.right_kb_id.is_none());
        assert!(!edge.hop_up);
        assert!(edge.argmax.is_none());
    }

    #[test]
    fn test_edge_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&EdgeType::VStructure).unwrap(),
            "\"v-structure\""
        );
        assert_eq!(
            serde_json::from_str::<EdgeType>("\"direct\"").unwrap(),
            EdgeType::Direct
        );
        assert_eq!(EdgeType::VStructure.to_string(), "v-structure");
        assert_eq!(EdgeType::Reverse.marker(), 'r');
    }

    #[test]
    fn test_hop_up_flag() {
        let g: SemanticGraph =
            serde_json::from_str(r#"{"edgeSet": [{"left": [0], "hopUp": true}]}"#).unwrap();
        assert!(g.edge_set[0].hop_up);
    }

    #[test]
    fn test_surface_form_skips_out_of_range() {
        let g = SemanticGraph::new(["what", "is", "missouri"]);
        assert_eq!(g.surface_form(&[2]), "missouri");
        assert_eq!(g.surface_form(&[2, 9]), "missouri");
        assert_eq!(g.surface_form(&[9]), "");
    }

    #[test]
    fn test_serialize_roundtrips_field_names() {
        let g = SemanticGraph::new(["a"]).with_edge(Edge::new().with_left([0]).with_hop_up());
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"edgeSet\""));
        assert!(json.contains("\"hopUp\""));
        assert!(!json.contains("\"kbID\""));
    }
}
