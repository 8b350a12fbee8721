//! Clause-IR serializer.
//!
//! The single place where clause structure becomes SPARQL text. Everything
//! upstream manipulates typed clauses; everything downstream sees a string.

use std::fmt;

use super::clause::{Clause, LabelClause, ObjectTerm, PredicateTerm, RelationClause, SelectQuery, ShapeSet, Var};
use super::{HOP_UP_RELATIONS, PROLOGUE, STATEMENTS_GRAPH, TERMS_GRAPH};
use crate::graph::EdgeType;

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Anchor => write!(f, "?e1"),
            Var::Predicate(i) => write!(f, "?p{i}"),
            Var::Mediator(i) => write!(f, "?m{i}"),
            Var::Object(i) => write!(f, "?e2{i}"),
            Var::Relation(i, t) => write!(f, "?r{i}{}", t.marker()),
            Var::QualifierPred(i) => write!(f, "?a{i}"),
            Var::Time(i) => write!(f, "?n{i}"),
        }
    }
}

/// Escape a surface label for use in a double-quoted literal.
fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl RelationClause {
    fn object_text(&self) -> String {
        let inner = match &self.object {
            ObjectTerm::Entity(id) => format!("e:{id}"),
            ObjectTerm::Var => Var::Object(self.edge).to_string(),
        };
        if self.hop_up {
            let path: Vec<String> = HOP_UP_RELATIONS.iter().map(|r| format!("e:{r}v")).collect();
            format!("[ _:s{} [ {} {} ]]", self.edge, path.join("|"), inner)
        } else {
            inner
        }
    }

    fn predicate_text(&self, shape: EdgeType) -> String {
        match &self.predicate {
            PredicateTerm::Entity(id) => format!("e:{id}"),
            PredicateTerm::Free => Var::Relation(self.edge, shape).to_string(),
        }
    }

    /// One `{GRAPH <statements> { ... }}` arm for a single shape.
    fn arm(&self, shape: EdgeType, with_restriction: bool) -> String {
        let anchor = Var::Anchor;
        let p = Var::Predicate(self.edge);
        let m = Var::Mediator(self.edge);
        let pred = self.predicate_text(shape);
        let o = self.object_text();
        let mut triples = match shape {
            EdgeType::Direct => format!("{anchor} {p} {m} . {m} {pred} {o} ."),
            EdgeType::Reverse => format!("{o} {p} {m} . {m} {pred} {anchor} ."),
            EdgeType::VStructure => format!("{m} {p} {o} . {m} {pred} {anchor} ."),
        };
        if with_restriction {
            let a = Var::QualifierPred(self.edge);
            let n = Var::Time(self.edge);
            triples.push_str(&format!(" {m} {a} [base:time {n}] ."));
        }
        format!("{{GRAPH <{STATEMENTS_GRAPH}> {{ {triples} }}}}")
    }
}

impl fmt::Display for RelationClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shapes {
            ShapeSet::One(shape) => f.write_str(&self.arm(shape, self.time_restricted)),
            // The union form has no restriction slot.
            ShapeSet::All => {
                let arms: Vec<String> = EdgeType::ALL.iter().map(|&s| self.arm(s, false)).collect();
                write!(f, "{{ {} }}", arms.join(" UNION "))
            }
        }
    }
}

impl fmt::Display for LabelClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obj = Var::Object(self.edge);
        let label = escape_literal(&self.label);
        write!(
            f,
            "{{ {{GRAPH <{TERMS_GRAPH}> {{ {obj} rdfs:label \"{label}\"@en }}}} \
             UNION {{GRAPH <{TERMS_GRAPH}> {{ {obj} skos:altLabel \"{label}\"@en }}}} }}"
        )
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Label(c) => c.fmt(f),
            Clause::Relation(c) => c.fmt(f),
        }
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PROLOGUE)?;
        if self.select.is_empty() {
            // Degenerate but still syntactically valid.
            f.write_str("SELECT DISTINCT * WHERE {\n")?;
        } else {
            writeln!(f, "SELECT DISTINCT {} WHERE {{", self.select_names().join(" "))?;
        }
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        f.write_str("}")?;
        if !self.order_by.is_empty() {
            let keys: Vec<String> = self.order_by.iter().map(|v| format!("DESC({v})")).collect();
            write!(f, " ORDER BY {} LIMIT 1", keys.join(" "))?;
        }
        Ok(())
    }
}
