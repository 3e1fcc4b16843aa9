//! Command dispatch and handlers.

pub mod affected;
pub mod classify;
pub mod graph;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::{ServiceContext, RECORD_ENV, REPLAY_ENV};

/// Revision label used for recordings made without a head revision.
const UNKNOWN_REVISION: &str = "unknown";

/// Dispatch a parsed command to its handler.
///
/// When `FNSCOPE_REPLAY` names a cassette file or a recording directory, the
/// ports are served from it. Otherwise, when `FNSCOPE_RECORD` is set to a
/// directory path, all port interactions are recorded to per-port cassette
/// files below that directory.
///
/// # Errors
///
/// Returns an error string if the cassettes cannot be loaded or written, or
/// if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    if let Ok(path) = env::var(REPLAY_ENV) {
        let path = PathBuf::from(path);
        let ctx = if path.is_dir() {
            ServiceContext::replaying_dir(&path)?
        } else {
            ServiceContext::replaying(&path)?
        };
        return dispatch_with_context(command, &ctx);
    }

    if let Ok(dir) = env::var(RECORD_ENV) {
        let revision = command.settings().after_sha.as_deref().unwrap_or(UNKNOWN_REVISION);
        let session = RecordingSession::new(Path::new(&dir), revision)?;
        let ctx = ServiceContext::recording(&session);
        let result = dispatch_with_context(command, &ctx);

        // Recording adapters hold the recorder Arcs.
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    dispatch_with_context(command, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Affected { settings, format } => affected::run(ctx, settings, *format),
        Command::Graph { settings } => graph::run(ctx, settings),
        Command::Classify { settings, paths } => classify::run(settings, paths),
    }
}

/// Finish a recording session and report the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    tracing::info!(dir = %output_dir.display(), "recording saved");
    Ok(())
}
