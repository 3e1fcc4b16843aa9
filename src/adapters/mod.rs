//! Adapters implementing the port traits.
//!
//! `live` talks to the real world, `recording` wraps another adapter and
//! captures each interaction, `replaying` serves interactions from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;

/// Cassette port name for [`crate::ports::RevisionComparison`].
pub const COMPARISON_PORT: &str = "comparison";
/// Cassette port name for [`crate::ports::ProjectFiles`].
pub const FILES_PORT: &str = "files";
/// Cassette port name for [`crate::ports::SourceAnalyzer`].
pub const ANALYSIS_PORT: &str = "analysis";
