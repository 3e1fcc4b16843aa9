//! Reference graph built from raw source-analysis output.
//!
//! Edge direction: `graph.dependents(origin)` yields the files that
//! reference `origin`, i.e. the files affected when `origin` changes.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Path segments that mark a file as outside first-party source.
pub const EXTERNAL_SEGMENTS: &[&str] = &["node_modules"];

/// Position of a reference inside the referencing file (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Line number.
    pub line: u32,
    /// Column number.
    pub column: u32,
}

/// One reference to an origin file, as reported by source analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReference {
    /// The file containing the reference.
    pub file: String,
    /// The path the reference resolved to.
    pub referenced_file_name: String,
    /// Where the reference appears in `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Raw analysis output: origin file to every reference pointing at it.
pub type RawReferenceMap = BTreeMap<String, Vec<RawReference>>;

/// Immutable mapping from a file to its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceGraph {
    edges: HashMap<String, Vec<String>>,
}

impl ReferenceGraph {
    /// Builds the graph, dropping every reference with an external endpoint.
    ///
    /// Dependents keep the order in which analysis reported them; repeated
    /// references from the same file collapse into one edge.
    #[must_use]
    pub fn from_raw(raw: &RawReferenceMap) -> Self {
        let mut edges = HashMap::with_capacity(raw.len());
        for (origin, references) in raw {
            if is_external(origin) {
                continue;
            }
            let mut seen = HashSet::new();
            let dependents: Vec<String> = references
                .iter()
                .filter(|r| !is_external(&r.file) && !is_external(&r.referenced_file_name))
                .filter(|r| seen.insert(r.file.as_str()))
                .map(|r| r.file.clone())
                .collect();
            edges.insert(origin.clone(), dependents);
        }
        Self { edges }
    }

    /// Builds a graph directly from origin/dependents pairs.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn from_edges<I, O, D>(edges: I) -> Self
    where
        I: IntoIterator<Item = (O, Vec<D>)>,
        O: Into<String>,
        D: Into<String>,
    {
        Self {
            edges: edges
                .into_iter()
                .map(|(origin, deps)| (origin.into(), deps.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Files that reference `origin`. Unknown origins have no dependents.
    #[must_use]
    pub fn dependents(&self, origin: &str) -> &[String] {
        self.edges.get(origin).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of origins with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no origins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Origins sorted by path, each with its dependents.
    #[must_use]
    pub fn to_sorted(&self) -> BTreeMap<&str, &[String]> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect()
    }
}

/// Segment-wise check so `my_node_modules_helper.ts` stays first-party.
fn is_external(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| EXTERNAL_SEGMENTS.contains(&segment))
}
