//! Replaying adapter for the `RevisionComparison` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::COMPARISON_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ComparisonFuture, ComparisonRequest, RevisionComparison};

/// Serves recorded comparisons from a cassette.
pub struct ReplayingRevisionComparison {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRevisionComparison {
    /// Create a replaying comparison client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl RevisionComparison for ReplayingRevisionComparison {
    fn compare(&self, _request: &ComparisonRequest) -> ComparisonFuture<'_> {
        let output = next_output(&self.replayer, COMPARISON_PORT, "compare");
        Box::pin(async move { replay_result(output, "comparison::compare") })
    }
}
