//! Run configuration: raw settings from flags/environment, compiled once.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

use crate::classify::{PathClassifier, DEFAULT_FULL_DEPLOYMENT_PATTERN, DEFAULT_UNIT_FILE_PATTERN};

/// Length revision identifiers are shortened to in comparison URLs.
const SHORT_SHA_LEN: usize = 7;

/// Fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A regular expression setting does not compile.
    #[error("invalid {name} pattern {pattern:?}: {source}")]
    Pattern {
        /// Which setting the pattern came from.
        name: &'static str,
        /// The offending pattern text.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: Box<fancy_regex::Error>,
    },
    /// The unit file enumeration glob does not compile.
    #[error("invalid unit file glob {pattern:?}: {source}")]
    Glob {
        /// The offending glob text.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: globset::Error,
    },
}

/// Raw settings, each readable from a flag or its environment variable.
#[derive(Debug, Clone, Default, Args)]
pub struct Settings {
    /// Comparison URL template with `{base}` and `{head}` placeholders.
    #[arg(long, env = "COMPARE_URL")]
    pub compare_url: Option<String>,

    /// Base revision of the comparison.
    #[arg(long, env = "BEFORE_SHA")]
    pub before_sha: Option<String>,

    /// Head revision of the comparison.
    #[arg(long, env = "AFTER_SHA")]
    pub after_sha: Option<String>,

    /// Bearer credential for the comparison service.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Root of the checked-out project.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<String>,

    /// Pattern for changed paths that force a full deployment [default: manifests and entry points].
    #[arg(long, env = FULL_DEPLOYMENT_ENV)]
    pub full_deployment_pattern: Option<String>,

    /// Pattern that classifies a path as a unit file [default: files under `functions/`].
    #[arg(long, env = UNIT_FILE_ENV)]
    pub unit_file_pattern: Option<String>,

    /// Glob (relative to the workspace) enumerating unit files.
    #[arg(long, env = "INDIVIDUAL_FUNCTION_GLOB")]
    pub unit_file_glob: Option<String>,

    /// Only changed paths matching this pattern are considered.
    #[arg(long, env = "FILE_CHANGES_REGEX_FILTER")]
    pub changed_file_filter: Option<String>,
}

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Comparison URL template.
    pub compare_url: String,
    /// Base revision.
    pub before_sha: String,
    /// Head revision.
    pub after_sha: String,
    /// Bearer credential.
    pub token: String,
    /// Project root.
    pub workspace: PathBuf,
    /// Unit file enumeration glob.
    pub unit_file_glob: String,
    /// Compiled classification rules.
    pub classifier: PathClassifier,
}

impl Settings {
    /// Compiles only the classification rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if any pattern fails to compile.
    pub fn classifier(&self) -> Result<PathClassifier, ConfigError> {
        PathClassifier::new(
            self.unit_pattern(),
            self.full_deployment(),
            non_empty(self.changed_file_filter.as_ref()),
        )
    }

    /// The unit file pattern, or the default when unset.
    #[must_use]
    pub fn unit_pattern(&self) -> &str {
        self.unit_file_pattern.as_deref().unwrap_or(DEFAULT_UNIT_FILE_PATTERN)
    }

    /// The full deployment pattern, or the default when unset.
    #[must_use]
    pub fn full_deployment(&self) -> &str {
        self.full_deployment_pattern.as_deref().unwrap_or(DEFAULT_FULL_DEPLOYMENT_PATTERN)
    }

    /// Marks pattern settings whose environment variable is set but empty.
    ///
    /// The argument parser treats an empty variable as unset, which would
    /// apply the default pattern. An empty pattern counts as missing instead.
    pub fn keep_empty_patterns<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let is_empty = |key: &str| lookup(key).is_some_and(|value| value.is_empty());
        if self.full_deployment_pattern.is_none() && is_empty(FULL_DEPLOYMENT_ENV) {
            self.full_deployment_pattern = Some(String::new());
        }
        if self.unit_file_pattern.is_none() && is_empty(UNIT_FILE_ENV) {
            self.unit_file_pattern = Some(String::new());
        }
    }

    /// Validates the enumeration glob, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Glob`] if the glob fails to compile.
    pub fn validate_glob(&self) -> Result<(), ConfigError> {
        if let Some(glob) = non_empty(self.unit_file_glob.as_ref()) {
            globset::Glob::new(glob)
                .map_err(|source| ConfigError::Glob { pattern: glob.to_string(), source })?;
        }
        Ok(())
    }

    /// Names of required settings that are absent or empty.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let required = [
            ("COMPARE_URL", self.compare_url.as_deref()),
            ("BEFORE_SHA", self.before_sha.as_deref()),
            ("AFTER_SHA", self.after_sha.as_deref()),
            ("GITHUB_TOKEN", self.token.as_deref()),
            ("GITHUB_WORKSPACE", self.workspace.as_deref()),
            (FULL_DEPLOYMENT_ENV, Some(self.full_deployment())),
            (UNIT_FILE_ENV, Some(self.unit_pattern())),
            ("INDIVIDUAL_FUNCTION_GLOB", self.unit_file_glob.as_deref()),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.map_or(true, str::is_empty))
            .map(|(key, _)| key)
            .collect()
    }

    /// Compiles the settings into a [`RunConfig`].
    ///
    /// Patterns are compiled before the remaining keys are checked so a
    /// broken pattern is reported even when other settings are missing.
    /// Returns `Ok(None)` when a required setting is missing or empty, which
    /// callers treat as a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a pattern or the glob fails to compile.
    pub fn load(&self) -> Result<Option<RunConfig>, ConfigError> {
        let missing = self.missing_keys();
        if self.full_deployment().is_empty() || self.unit_pattern().is_empty() {
            tracing::info!(missing = ?missing, "required settings absent; skipping");
            return Ok(None);
        }

        let classifier = self.classifier()?;
        self.validate_glob()?;

        if !missing.is_empty() {
            tracing::info!(missing = ?missing, "required settings absent; skipping");
            return Ok(None);
        }

        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Ok(Some(RunConfig {
            compare_url: field(&self.compare_url),
            before_sha: field(&self.before_sha),
            after_sha: field(&self.after_sha),
            token: field(&self.token),
            workspace: PathBuf::from(field(&self.workspace)),
            unit_file_glob: field(&self.unit_file_glob),
            classifier,
        }))
    }
}

impl RunConfig {
    /// The comparison URL for this run's revisions.
    #[must_use]
    pub fn comparison_url(&self) -> String {
        expand_compare_url(&self.compare_url, &self.before_sha, &self.after_sha)
    }
}

/// Substitutes shortened revisions for the first `{base}` and `{head}` placeholders.
#[must_use]
pub fn expand_compare_url(template: &str, base: &str, head: &str) -> String {
    template.replacen("{base}", short_sha(base), 1).replacen("{head}", short_sha(head), 1)
}

fn short_sha(sha: &str) -> &str {
    sha.char_indices().nth(SHORT_SHA_LEN).map_or(sha, |(end, _)| &sha[..end])
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Environment variable holding the full deployment pattern.
const FULL_DEPLOYMENT_ENV: &str = "FULL_DEPLOYMENT_REGEX";
/// Environment variable holding the unit file pattern.
const UNIT_FILE_ENV: &str = "INDIVIDUAL_FUNCTION_REGEX";
