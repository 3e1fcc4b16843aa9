//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects port interactions and writes them as one YAML cassette.
///
/// The recording timestamp is taken when the recorder is created.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            cassette: Cassette {
                name: name.into(),
                recorded_at: Utc::now(),
                revision: revision.into(),
                interactions: Vec::new(),
            },
        }
    }

    /// Append an interaction; `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = u64::try_from(self.cassette.interactions.len()).unwrap_or(u64::MAX);
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Write the cassette to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(&self.cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        tracing::debug!(path = %self.path.display(), interactions = self.cassette.interactions.len(), "cassette written");
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "ci-run", "deadbeef");
        recorder.record("comparison", "compare", json!({"url": "u"}), json!({"Ok": {"files": []}}));
        recorder.record("files", "glob", json!({"pattern": "**/*.ts"}), json!({"Ok": []}));
        recorder.record("analysis", "references", json!({"roots": []}), json!({"Ok": {}}));

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "ci-run");
        assert_eq!(cassette.revision, "deadbeef");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, [0, 1, 2]);
        assert_eq!(cassette.interactions[2].port, "analysis");
    }

    #[test]
    fn finish_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session/files.cassette.yaml");
        let recorder = CassetteRecorder::new(&path, "empty", "abc");

        assert_eq!(recorder.finish().unwrap(), path);
        assert!(Cassette::load(&path).unwrap().interactions.is_empty());
    }
}
