//! Recording adapter for the `ProjectFiles` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::adapters::FILES_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::ProjectFiles;

/// Records file enumeration while delegating to an inner implementation.
pub struct RecordingProjectFiles {
    inner: Box<dyn ProjectFiles>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProjectFiles {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Box<dyn ProjectFiles>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct GlobInput<'a> {
    root: String,
    pattern: &'a str,
}

impl ProjectFiles for RecordingProjectFiles {
    fn glob(
        &self,
        root: &Path,
        pattern: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.glob(root, pattern);
        let input = GlobInput { root: root.display().to_string(), pattern };
        record_result(&self.recorder, FILES_PORT, "glob", &input, &result);
        result
    }
}
