//! Record-replay round-trip integration test.
//!
//! Records the live file and analysis ports over a small project, replays the
//! per-port cassettes, and checks the replayed outputs match.

use std::fs;
use std::path::Path;

use fnscope::cassette::session::RecordingSession;
use fnscope::context::ServiceContext;
use fnscope::graph::{RawReferenceMap, ReferenceGraph};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn exercise_ports(ctx: &ServiceContext, root: &Path) -> (Vec<String>, RawReferenceMap) {
    let units = ctx.files.glob(root, "src/functions/**/*.ts").unwrap();
    let references = ctx.analyzer.references(&units).unwrap();
    (units, references)
}

#[test]
fn record_then_replay_produces_identical_outputs() {
    let project = tempfile::tempdir().unwrap();
    let root = project.path();
    write(root, "src/functions/a.function.ts", "import { s } from '../shared';\n");
    write(root, "src/functions/b.function.ts", "import { t } from '../shared2';\n");
    write(root, "src/shared.ts", "export const s = 1;\n");
    write(root, "src/shared2.ts", "import { s } from './shared';\nimport z from 'zod';\n");

    let cassettes = tempfile::tempdir().unwrap();
    let session = RecordingSession::new(cassettes.path(), "abc123").unwrap();
    let ctx = ServiceContext::recording(&session);
    let recorded = exercise_ports(&ctx, root);
    drop(ctx);
    let session_dir = session.finish().unwrap();

    assert_eq!(recorded.0.len(), 2);
    let shared = root.join("src/shared.ts").display().to_string();
    assert_eq!(recorded.1[&shared].len(), 2);

    let replayed = exercise_ports(&ServiceContext::replaying_dir(&session_dir).unwrap(), root);
    assert_eq!(replayed, recorded);

    // The replayed graph drops the external package edge.
    let graph = ReferenceGraph::from_raw(&replayed.1);
    assert!(graph.dependents("node_modules/zod").is_empty());
    assert_eq!(graph.dependents(&shared).len(), 2);

    // Second replay is deterministic.
    let again = exercise_ports(&ServiceContext::replaying_dir(&session_dir).unwrap(), root);
    assert_eq!(again, recorded);
}
