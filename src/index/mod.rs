//! Entity label index.
//!
//! Read-only reverse lookup from knowledge-base id to canonical labels,
//! built once at startup by inverting a tab-separated `label<TAB>id`
//! dictionary. Immutable after construction — unbounded concurrent readers
//! need no locking because there is no post-construction writer.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use crate::{Error, Result};

/// Reverse lookup: knowledge-base id → canonical labels.
///
/// One id may carry several labels and one label may name several ids;
/// inversion preserves both directions, collapsing only exact duplicate
/// (label, id) pairs.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    labels: HashMap<String, Vec<String>>,
}

impl EntityIndex {
    /// An index that knows no entities. Every lookup falls through to the
    /// caller's raw-id fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from `(label, id)` pairs.
    pub fn from_pairs<L, I>(pairs: impl IntoIterator<Item = (L, I)>) -> Self
    where
        L: Into<String>,
        I: Into<String>,
    {
        let mut index = Self::empty();
        for (label, id) in pairs {
            index.insert(label.into(), id.into());
        }
        index
    }

    /// Load a UTF-8 `label<TAB>id` dictionary (one pair per line, no
    /// header) and invert it.
    ///
    /// The whole load is rejected on the first unreadable or malformed
    /// line; partial dictionaries are worse than empty ones because they
    /// silently skew evaluation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::DictionaryIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut index = Self::empty();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            let (label, id) = line.split_once('\t').ok_or_else(|| Error::DictionaryFormat {
                path: path.to_path_buf(),
                line: line_no + 1,
            })?;
            index.insert(label.to_string(), id.to_string());
        }
        Ok(index)
    }

    /// Load a dictionary, degrading to an empty index on any fault.
    ///
    /// The fault is reported through the log; lookups against the empty
    /// index all take the raw-id fallback path.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(index) => index,
            Err(fault) => {
                tracing::error!(%fault, "no entity map loaded");
                Self::empty()
            }
        }
    }

    fn insert(&mut self, label: String, id: String) {
        let labels = self.labels.entry(id).or_default();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    /// Every canonical label recorded for `id`, in dictionary order.
    pub fn labels(&self, id: &str) -> Option<&[String]> {
        self.labels.get(id).map(Vec::as_slice)
    }

    /// Number of distinct ids in the index.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
