//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the propagation core and an
//! external collaborator (revision comparison, project file enumeration,
//! source analysis). Implementations live in `src/adapters/`.

pub mod analysis;
pub mod comparison;
pub mod files;

pub use analysis::SourceAnalyzer;
pub use comparison::{
    ChangedFile, CommitComparison, ComparisonFuture, ComparisonRequest, RevisionComparison,
};
pub use files::ProjectFiles;
