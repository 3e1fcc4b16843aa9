//! Recording adapter for the `SourceAnalyzer` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::adapters::ANALYSIS_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::graph::RawReferenceMap;
use crate::ports::SourceAnalyzer;

/// Records analysis results while delegating to an inner implementation.
pub struct RecordingSourceAnalyzer {
    inner: Box<dyn SourceAnalyzer>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSourceAnalyzer {
    /// Creates a new recording analyzer wrapping the given implementation.
    pub fn new(inner: Box<dyn SourceAnalyzer>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RootsInput<'a> {
    roots: &'a [String],
}

impl SourceAnalyzer for RecordingSourceAnalyzer {
    fn references(
        &self,
        roots: &[String],
    ) -> Result<RawReferenceMap, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.references(roots);
        record_result(&self.recorder, ANALYSIS_PORT, "references", &RootsInput { roots }, &result);
        result
    }
}
