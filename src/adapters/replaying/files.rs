//! Replaying adapter for the `ProjectFiles` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::FILES_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::ProjectFiles;

/// Replays recorded file enumerations from a cassette.
pub struct ReplayingProjectFiles {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProjectFiles {
    /// Creates a new replaying adapter from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ProjectFiles for ReplayingProjectFiles {
    fn glob(
        &self,
        _root: &Path,
        _pattern: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(next_output(&self.replayer, FILES_PORT, "glob"), "files::glob")
    }
}
