//! `fnscope graph` command.

use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::pipeline::build_graph;

/// Execute the `graph` command: print origin → dependents as pretty JSON.
///
/// # Errors
///
/// Returns an error string if the workspace or glob is missing or invalid,
/// or if enumeration or analysis fails.
pub fn run(ctx: &ServiceContext, settings: &Settings) -> Result<(), String> {
    println!("{}", render(ctx, settings)?);
    Ok(())
}

/// Builds the graph and renders it, keys sorted.
///
/// # Errors
///
/// Same as [`run`].
pub fn render(ctx: &ServiceContext, settings: &Settings) -> Result<String, String> {
    settings.validate_glob().map_err(|e| e.to_string())?;
    let workspace = settings.workspace.as_deref().filter(|w| !w.is_empty());
    let glob = settings.unit_file_glob.as_deref().filter(|g| !g.is_empty());
    let (Some(workspace), Some(glob)) = (workspace, glob) else {
        return Err("graph needs GITHUB_WORKSPACE and INDIVIDUAL_FUNCTION_GLOB".to_string());
    };

    let graph = build_graph(ctx, Path::new(workspace), glob).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&graph.to_sorted())
        .map_err(|e| format!("failed to serialize graph: {e}"))
}
