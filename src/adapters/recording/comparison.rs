//! Recording adapter for the `RevisionComparison` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::COMPARISON_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ComparisonFuture, ComparisonRequest, RevisionComparison};

/// Records comparison interactions while delegating to an inner implementation.
pub struct RecordingRevisionComparison {
    inner: Box<dyn RevisionComparison>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRevisionComparison {
    /// Creates a new recording comparison client wrapping the given implementation.
    pub fn new(
        inner: Box<dyn RevisionComparison>,
        recorder: Arc<Mutex<CassetteRecorder>>,
    ) -> Self {
        Self { inner, recorder }
    }
}

impl RevisionComparison for RecordingRevisionComparison {
    fn compare(&self, request: &ComparisonRequest) -> ComparisonFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.compare(&request).await;
            // The token is skipped by the request's serializer.
            record_result(&recorder, COMPARISON_PORT, "compare", &request, &result);
            result
        })
    }
}
