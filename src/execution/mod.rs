//! SPARQL query execution.
//!
//! A thin blocking client around a read-only SPARQL endpoint. Faults are
//! typed at this layer ([`SparqlEndpoint::query`]) and collapse to an empty
//! result set only at the boundary the answer pipeline consumes
//! ([`SparqlEndpoint::query_or_empty`]) — one bad query out of a batch of
//! thousands must never abort the surrounding evaluation loop.

use std::time::Duration;

use hashbrown::HashMap;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::sparql::ENTITY_NAMESPACE;
use crate::{Error, Result};

/// One result row: variable name → bare entity id (namespace stripped).
pub type Binding = HashMap<String, String>;

// ============================================================================
// Endpoint configuration
// ============================================================================

/// Configuration for a SPARQL endpoint connection.
///
/// Constructed explicitly and injected into [`SparqlEndpoint::new`]; there
/// is no process-wide endpoint handle.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub url: String,
    /// Hard per-request timeout. A request that exceeds it is a fault like
    /// any other.
    pub timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://knowledgebase:8890/sparql".into(),
            timeout: Duration::from_secs(40),
        }
    }
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// SparqlEndpoint
// ============================================================================

/// Blocking read-only SPARQL endpoint client.
pub struct SparqlEndpoint {
    config: EndpointConfig,
    client: Client,
}

impl SparqlEndpoint {
    /// Build a client with the configured hard timeout.
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Execute a query, keeping the fault typed and inspectable.
    ///
    /// Sends one GET request, parses the JSON result set, and post-filters
    /// it to well-formed entity bindings. No retries — retry policy, if
    /// any, belongs to the caller.
    pub fn query(&self, sparql: &str) -> Result<Vec<Binding>> {
        let body = self
            .client
            .get(&self.config.url)
            .query(&[("query", sparql)])
            .header(ACCEPT, "application/sparql-results+json")
            .send()?
            .error_for_status()?
            .text()?;
        parse_result_set(&body)
    }

    /// Execute a query, collapsing any fault to an empty result set.
    ///
    /// This is the total-function boundary the canonicalizer consumes.
    pub fn query_or_empty(&self, sparql: &str) -> Vec<Binding> {
        match self.query(sparql) {
            Ok(rows) => rows,
            Err(fault) => {
                tracing::debug!(%fault, "endpoint fault suppressed");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Result-set parsing and filtering
// ============================================================================

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

/// One term of the SPARQL JSON result format. Only the value is consumed;
/// the accompanying type tag is implied by the entity-IRI filter.
#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Parse a SPARQL JSON result set and filter it to entity bindings.
pub(crate) fn parse_result_set(body: &str) -> Result<Vec<Binding>> {
    let response: SparqlResponse = serde_json::from_str(body).map_err(Error::MalformedResults)?;
    Ok(filter_entity_bindings(response.results.bindings))
}

/// Keep only rows whose every value is an entity IRI, stripping the
/// namespace from kept values. A row with one non-entity value is dropped
/// whole, never partially retained.
fn filter_entity_bindings(rows: Vec<HashMap<String, SparqlTerm>>) -> Vec<Binding> {
    rows.into_iter()
        .filter_map(|row| {
            row.into_iter()
                .map(|(var, term)| {
                    term.value
                        .strip_prefix(ENTITY_NAMESPACE)
                        .map(|id| (var, id.to_string()))
                })
                .collect::<Option<Binding>>()
        })
        .collect()
}
