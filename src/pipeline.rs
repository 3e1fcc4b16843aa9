//! End-to-end run: change set in, affected unit names out.

use std::error::Error;
use std::path::Path;

use clap::ValueEnum;
use serde_json::json;
use thiserror::Error;

use crate::config::RunConfig;
use crate::context::ServiceContext;
use crate::graph::ReferenceGraph;
use crate::names;
use crate::paths::resolve_in;
use crate::ports::ComparisonRequest;
use crate::propagate::propagate;

/// Marker that prefixes an explicit unit list on the output line.
pub const UNITS_MARKER: char = ':';

/// Failures of the external collaborators during a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The revision comparison could not be fetched or decoded.
    #[error("revision comparison failed: {0}")]
    Comparison(#[source] Box<dyn Error + Send + Sync>),
    /// Unit files could not be enumerated.
    #[error("unit file enumeration failed: {0}")]
    Enumeration(#[source] Box<dyn Error + Send + Sync>),
    /// Source analysis failed.
    #[error("source analysis failed: {0}")]
    Analysis(#[source] Box<dyn Error + Send + Sync>),
}

/// What the caller should deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to deploy: the change set was empty or touched no unit.
    NoAffectedUnits,
    /// A structural file changed; redeploy everything.
    FullDeployment,
    /// Deploy exactly these units.
    Units(Vec<String>),
}

/// How an [`Outcome`] is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Empty line, or `:` followed by comma-separated unit names.
    #[default]
    Line,
    /// `{"outcome": ..., "units": [...]}`.
    Json,
}

impl Outcome {
    /// Short machine-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAffectedUnits => "no_affected_units",
            Self::FullDeployment => "full_deployment",
            Self::Units(_) => "units",
        }
    }

    /// Renders the single output line.
    ///
    /// In [`OutputFormat::Line`], "no affected units" and "full deployment"
    /// both render as an empty line.
    #[must_use]
    pub fn render(&self, format: OutputFormat) -> String {
        let units: &[String] = match self {
            Self::Units(units) => units,
            _ => &[],
        };
        match format {
            OutputFormat::Line if units.is_empty() => String::new(),
            OutputFormat::Line => format!("{UNITS_MARKER}{}", units.join(",")),
            OutputFormat::Json => json!({ "outcome": self.label(), "units": units }).to_string(),
        }
    }
}

/// Fetches the change set and computes the outcome.
///
/// The comparison call is the only suspension point.
///
/// # Errors
///
/// Returns a [`PipelineError`] if any collaborator fails.
pub async fn run(ctx: &ServiceContext, config: &RunConfig) -> Result<Outcome, PipelineError> {
    let request = ComparisonRequest { url: config.comparison_url(), token: config.token.clone() };
    let comparison = ctx.comparison.compare(&request).await.map_err(PipelineError::Comparison)?;

    let fetched = comparison.files.len();
    let changed: Vec<String> = comparison
        .paths()
        .into_iter()
        .filter(|path| config.classifier.passes_inclusion_filter(path))
        .collect();
    tracing::info!(fetched, included = changed.len(), "fetched change set");

    affected(ctx, config, &changed)
}

/// Computes the outcome for an already fetched, already filtered change set.
///
/// # Errors
///
/// Returns a [`PipelineError`] if enumeration or analysis fails.
pub fn affected(
    ctx: &ServiceContext,
    config: &RunConfig,
    changed: &[String],
) -> Result<Outcome, PipelineError> {
    if changed.is_empty() {
        return Ok(Outcome::NoAffectedUnits);
    }
    if config.classifier.triggers_full_deployment(changed) {
        tracing::info!("change set touches a full deployment trigger");
        return Ok(Outcome::FullDeployment);
    }

    let changed_paths: Vec<String> =
        changed.iter().map(|path| resolve_in(&config.workspace, path)).collect();
    let graph = build_graph(ctx, &config.workspace, &config.unit_file_glob)?;

    let unit_files = propagate(&changed_paths, &graph, &config.classifier);
    let names = names::resolve(&unit_files);
    tracing::info!(unit_files = unit_files.len(), units = names.len(), "propagation finished");

    if names.is_empty() {
        Ok(Outcome::NoAffectedUnits)
    } else {
        Ok(Outcome::Units(names))
    }
}

/// Enumerates unit files and builds the filtered reference graph from them.
///
/// # Errors
///
/// Returns a [`PipelineError`] if enumeration or analysis fails.
pub fn build_graph(
    ctx: &ServiceContext,
    workspace: &Path,
    unit_file_glob: &str,
) -> Result<ReferenceGraph, PipelineError> {
    let roots = ctx.files.glob(workspace, unit_file_glob).map_err(PipelineError::Enumeration)?;
    let raw = ctx.analyzer.references(&roots).map_err(PipelineError::Analysis)?;
    let graph = ReferenceGraph::from_raw(&raw);
    tracing::debug!(roots = roots.len(), origins = graph.len(), "built reference graph");
    Ok(graph)
}
