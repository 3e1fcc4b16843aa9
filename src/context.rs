//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::recording::{
    RecordingProjectFiles, RecordingRevisionComparison, RecordingSourceAnalyzer,
};
use crate::adapters::replaying::{
    ReplayingProjectFiles, ReplayingRevisionComparison, ReplayingSourceAnalyzer,
};
use crate::adapters::{ANALYSIS_PORT, COMPARISON_PORT, FILES_PORT};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{ProjectFiles, RevisionComparison, SourceAnalyzer};

/// Environment variable naming a directory to record cassettes into.
pub const RECORD_ENV: &str = "FNSCOPE_RECORD";
/// Environment variable naming a cassette file or directory to replay.
pub const REPLAY_ENV: &str = "FNSCOPE_REPLAY";

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Revision comparison service.
    pub comparison: Box<dyn RevisionComparison>,
    /// Unit file enumeration.
    pub files: Box<dyn ProjectFiles>,
    /// Source analysis.
    pub analyzer: Box<dyn SourceAnalyzer>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::analysis::LiveSourceAnalyzer;
        use crate::adapters::live::comparison::LiveRevisionComparison;
        use crate::adapters::live::files::LiveProjectFiles;

        Self {
            comparison: Box::new(LiveRevisionComparison::new()),
            files: Box::new(LiveProjectFiles),
            analyzer: Box::new(LiveSourceAnalyzer),
        }
    }

    /// Creates a live context whose interactions are captured by `session`.
    ///
    /// The context must be dropped before `session.finish()` is called.
    #[must_use]
    pub fn recording(session: &RecordingSession) -> Self {
        let live = Self::live();
        Self {
            comparison: Box::new(RecordingRevisionComparison::new(
                live.comparison,
                session.comparison.clone(),
            )),
            files: Box::new(RecordingProjectFiles::new(live.files, session.files.clone())),
            analyzer: Box::new(RecordingSourceAnalyzer::new(
                live.analyzer,
                session.analysis.clone(),
            )),
        }
    }

    /// Creates a replaying context from one cassette holding every port.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            comparison: Box::new(ReplayingRevisionComparison::new(CassetteReplayer::new(
                cassette,
            ))),
            files: Box::new(ReplayingProjectFiles::new(CassetteReplayer::new(cassette))),
            analyzer: Box::new(ReplayingSourceAnalyzer::new(CassetteReplayer::new(cassette))),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Creates a replaying context from the per-port cassettes of a
    /// recording session directory.
    ///
    /// Ports without a `<port>.cassette.yaml` file panic when called.
    ///
    /// # Errors
    ///
    /// Returns an error if a present cassette file cannot be read or parsed.
    pub fn replaying_dir(dir: &Path) -> Result<Self, String> {
        let load = |port: &str| -> Result<CassetteReplayer, String> {
            let path = dir.join(format!("{port}.cassette.yaml"));
            if path.exists() {
                Ok(CassetteReplayer::new(&Cassette::load(&path)?))
            } else {
                Ok(CassetteReplayer::empty())
            }
        };

        Ok(Self {
            comparison: Box::new(ReplayingRevisionComparison::new(load(COMPARISON_PORT)?)),
            files: Box::new(ReplayingProjectFiles::new(load(FILES_PORT)?)),
            analyzer: Box::new(ReplayingSourceAnalyzer::new(load(ANALYSIS_PORT)?)),
        })
    }
}
