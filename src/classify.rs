//! Pattern rules that classify file paths.
//!
//! Three independent questions are answered here: is a path a deployable
//! unit file, does a change set force a full deployment, and does a changed
//! path pass the optional inclusion filter. Patterns are compiled once and
//! the classifier holds no mutable state.

use fancy_regex::Regex;

use crate::config::ConfigError;

/// Unit files: anything under a `functions` directory except its top-level
/// `index.ts`, or any file carrying the `.function` qualifier.
pub const DEFAULT_UNIT_FILE_PATTERN: &str =
    r"(functions/(?!index\.ts$).*\.ts|(.*)\.function\.ts)$";

/// Manifests, lockfiles and aggregate entry points.
pub const DEFAULT_FULL_DEPLOYMENT_PATTERN: &str =
    r"((tsconfig|package).json|yarn.lock|src/(functions/)?index.ts)$";

/// Compiled classification rules.
///
/// Unit file patterns see absolute paths during propagation, so the
/// workspace location takes part in the match: under a checkout such as
/// `/runner/work/functions/functions`, the default pattern treats every
/// `.ts` file as a unit.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    unit_file: Regex,
    full_deployment: Regex,
    inclusion: Option<Regex>,
}

impl PathClassifier {
    /// Compiles the three pattern rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] naming the first pattern that fails to compile.
    pub fn new(
        unit_file_pattern: &str,
        full_deployment_pattern: &str,
        inclusion_pattern: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            unit_file: compile("unit file", unit_file_pattern)?,
            full_deployment: compile("full deployment", full_deployment_pattern)?,
            inclusion: inclusion_pattern.map(|p| compile("changed file filter", p)).transpose()?,
        })
    }

    /// Returns `true` if `path` names a deployable unit.
    #[must_use]
    pub fn is_unit_file(&self, path: &str) -> bool {
        matches(&self.unit_file, path)
    }

    /// Returns `true` if any path in `paths` forces a full deployment.
    #[must_use]
    pub fn triggers_full_deployment<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        paths.iter().any(|p| matches(&self.full_deployment, p.as_ref()))
    }

    /// Returns `true` when no inclusion filter is configured or `path` matches it.
    #[must_use]
    pub fn passes_inclusion_filter(&self, path: &str) -> bool {
        self.inclusion.as_ref().map_or(true, |filter| matches(filter, path))
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        name,
        pattern: pattern.to_string(),
        source: Box::new(source),
    })
}

/// Runtime match failures (backtrack limit) count as "no match".
fn matches(regex: &Regex, path: &str) -> bool {
    match regex.is_match(path) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!(pattern = regex.as_str(), path, error = %err, "pattern match aborted");
            false
        }
    }
}
