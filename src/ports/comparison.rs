//! Revision comparison port: which files changed between two revisions.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`RevisionComparison`] to keep the trait dyn-compatible.
pub type ComparisonFuture<'a> = Pin<
    Box<dyn Future<Output = Result<CommitComparison, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A request to compare two revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Fully expanded comparison URL.
    pub url: String,
    /// Bearer credential. Never serialized into cassettes.
    #[serde(skip)]
    pub token: String,
}

/// One changed file in a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path.
    pub filename: String,
    /// Change kind reported by the service (`added`, `modified`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Lines added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u64>,
    /// Lines removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
    /// Total lines changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
}

/// The result of comparing two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitComparison {
    /// Changed files in service order.
    pub files: Vec<ChangedFile>,
}

impl CommitComparison {
    /// Changed paths in service order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.filename.clone()).collect()
    }
}

/// Lists the files changed between two revisions of the source tree.
pub trait RevisionComparison: Send + Sync {
    /// Fetches the comparison described by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn compare(&self, request: &ComparisonRequest) -> ComparisonFuture<'_>;
}
