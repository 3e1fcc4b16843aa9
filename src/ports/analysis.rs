//! Source analysis port: who references which file.

use crate::graph::RawReferenceMap;

/// Discovers file references by static analysis.
///
/// Abstracting analysis keeps the propagation pipeline independent of any
/// particular language toolchain and allows deterministic replay.
pub trait SourceAnalyzer: Send + Sync {
    /// Returns, for every file transitively reachable from `roots`, the
    /// references pointing at it.
    ///
    /// # Errors
    ///
    /// Returns an error if a reachable file cannot be read.
    fn references(
        &self,
        roots: &[String],
    ) -> Result<RawReferenceMap, Box<dyn std::error::Error + Send + Sync>>;
}
