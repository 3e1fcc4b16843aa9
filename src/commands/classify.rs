//! `fnscope classify` command.

use serde::Serialize;

use crate::config::Settings;

/// How one path is classified.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    /// The path as given.
    pub path: &'a str,
    /// Matches the unit file pattern.
    pub unit_file: bool,
    /// Matches the full deployment pattern.
    pub full_deployment: bool,
    /// Passes the changed file filter.
    pub included: bool,
}

/// Execute the `classify` command.
///
/// # Errors
///
/// Returns an error string if a pattern fails to compile.
pub fn run(settings: &Settings, paths: &[String]) -> Result<(), String> {
    let rows = classify(settings, paths)?;
    let rendered =
        serde_json::to_string_pretty(&rows).map_err(|e| format!("failed to serialize: {e}"))?;
    println!("{rendered}");
    Ok(())
}

/// Classifies every path with the configured patterns.
///
/// # Errors
///
/// Returns an error string if a pattern fails to compile.
pub fn classify<'a>(settings: &Settings, paths: &'a [String]) -> Result<Vec<Classification<'a>>, String> {
    if let Some(key) = settings
        .missing_keys()
        .into_iter()
        .find(|key| ["FULL_DEPLOYMENT_REGEX", "INDIVIDUAL_FUNCTION_REGEX"].contains(key))
    {
        return Err(format!("{key} is empty"));
    }
    let classifier = settings.classifier().map_err(|e| e.to_string())?;
    Ok(paths
        .iter()
        .map(|path| Classification {
            path,
            unit_file: classifier.is_unit_file(path),
            full_deployment: classifier.triggers_full_deployment(std::slice::from_ref(path)),
            included: classifier.passes_inclusion_filter(path),
        })
        .collect())
}
