//! Replaying adapter for the `SourceAnalyzer` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::ANALYSIS_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::graph::RawReferenceMap;
use crate::ports::SourceAnalyzer;

/// Replays recorded analysis results from a cassette.
pub struct ReplayingSourceAnalyzer {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingSourceAnalyzer {
    /// Creates a new replaying analyzer from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl SourceAnalyzer for ReplayingSourceAnalyzer {
    fn references(
        &self,
        _roots: &[String],
    ) -> Result<RawReferenceMap, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(next_output(&self.replayer, ANALYSIS_PORT, "references"), "analysis::references")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replays_hand_written_lowercase_result() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            revision: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "analysis".into(),
                method: "references".into(),
                input: json!({}),
                output: json!({"ok": {
                    "/w/src/shared.ts": [
                        {"file": "/w/src/functions/a.ts", "referenced_file_name": "/w/src/shared.ts"}
                    ]
                }}),
            }],
        };
        let analyzer = ReplayingSourceAnalyzer::new(CassetteReplayer::new(&cassette));
        let map = analyzer.references(&[]).unwrap();
        assert_eq!(map["/w/src/shared.ts"][0].file, "/w/src/functions/a.ts");
        assert_eq!(map["/w/src/shared.ts"][0].location, None);
    }
}
