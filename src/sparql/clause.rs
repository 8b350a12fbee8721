//! SPARQL clause IR
//!
//! These types represent a compiled query as a sequence of typed clauses.
//! They are pure data — no graph references, no rendering, no I/O. Variable
//! names are derived from `(kind, edge index)` at render time, so two edges
//! can never collide on a placeholder name.

use crate::graph::EdgeType;

/// A query variable, namespaced by the edge that introduced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    /// `?e1` — the subject anchor, shared by every edge.
    Anchor,
    /// `?p{i}` — the entity→statement predicate of edge `i`.
    Predicate(usize),
    /// `?m{i}` — the statement (mediator) node of edge `i`.
    Mediator(usize),
    /// `?e2{i}` — the unresolved object entity of edge `i`.
    Object(usize),
    /// `?r{i}d` / `?r{i}r` / `?r{i}v` — the unresolved statement→value
    /// relation of edge `i`, one variable per shape.
    Relation(usize, EdgeType),
    /// `?a{i}` — the qualifier-predicate slot of edge `i`'s time restriction.
    QualifierPred(usize),
    /// `?n{i}` — edge `i`'s time qualifier value; target of the global
    /// ORDER BY.
    Time(usize),
}

/// The statement→value predicate of a relation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateTerm {
    /// Resolved: `e:<kbID>` in every rendered shape arm.
    Entity(String),
    /// Unresolved: `?r{i}<shape marker>`, one variable per rendered arm.
    Free,
}

/// The object-entity term of a relation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectTerm {
    /// Resolved: `e:<id>`.
    Entity(String),
    /// Unresolved: `?e2{i}`, bound through a companion [`LabelClause`].
    Var,
}

/// Which relation shapes a relation clause covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSet {
    One(EdgeType),
    /// UNION of all three shapes. The union form carries no restriction
    /// slot, so a time restriction is never rendered inside it.
    All,
}

/// One edge's traversal pattern over the statements graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationClause {
    pub edge: usize,
    pub shapes: ShapeSet,
    pub predicate: PredicateTerm,
    pub object: ObjectTerm,
    /// Widen the object match through the hop-up relation whitelist.
    pub hop_up: bool,
    /// Bind the statement's time qualifier inside single-shape patterns.
    pub time_restricted: bool,
}

/// Exact/alternate label match binding `?e2{i}` through the terms graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelClause {
    pub edge: usize,
    /// Title-cased surface label, not yet literal-escaped.
    pub label: String,
}

/// A clause in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Label(LabelClause),
    Relation(RelationClause),
}

/// A complete SELECT query: projected variables, body clauses, and the
/// query-global extremal-time order clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Free variables in registration order, plus the anchor when requested.
    pub select: Vec<Var>,
    pub clauses: Vec<Clause>,
    /// Time variables ordered jointly (descending, `LIMIT 1`) when any edge
    /// requested an extremal match.
    pub order_by: Vec<Var>,
}

impl SelectQuery {
    /// The projected variable names, rendered (`?r0d`, `?e20`, `?e1`, ...).
    pub fn select_names(&self) -> Vec<String> {
        self.select.iter().map(Var::to_string).collect()
    }
}
