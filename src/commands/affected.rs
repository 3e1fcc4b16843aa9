//! `fnscope affected` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::pipeline::{self, OutputFormat};

/// Execute the `affected` command.
///
/// Prints at most one line on stdout. Missing settings and pipeline failures
/// print nothing and still succeed.
///
/// # Errors
///
/// Returns an error string if a pattern or glob fails to compile, or if the
/// async runtime cannot be started.
pub fn run(ctx: &ServiceContext, settings: &Settings, format: OutputFormat) -> Result<(), String> {
    if let Some(line) = evaluate(ctx, settings, format)? {
        println!("{line}");
    }
    Ok(())
}

/// Runs the pipeline and returns the line to print, if any.
///
/// # Errors
///
/// Same as [`run`].
pub fn evaluate(
    ctx: &ServiceContext,
    settings: &Settings,
    format: OutputFormat,
) -> Result<Option<String>, String> {
    let Some(config) = settings.load().map_err(|e| e.to_string())? else {
        return Ok(None);
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    match runtime.block_on(pipeline::run(ctx, &config)) {
        Ok(outcome) => {
            tracing::info!(outcome = outcome.label(), "change propagation finished");
            Ok(Some(outcome.render(format)))
        }
        Err(err) => {
            tracing::warn!(error = %err, "change propagation failed; printing nothing");
            Ok(None)
        }
    }
}
