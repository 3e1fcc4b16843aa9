//! Live project files adapter: directory walk filtered by a glob.

use std::path::Path;

use globset::GlobBuilder;
use walkdir::{DirEntry, WalkDir};

use crate::paths::normalize;
use crate::ports::files::ProjectFiles;

/// Directories never descended into while enumerating.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Walks the real file tree.
pub struct LiveProjectFiles;

impl ProjectFiles for LiveProjectFiles {
    fn glob(
        &self,
        root: &Path,
        pattern: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        // `*` stays within one path segment, as in shell globs.
        let matcher = GlobBuilder::new(pattern).literal_separator(true).build()?.compile_matcher();

        let mut files = Vec::new();
        for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped_dir(e)) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if matcher.is_match(relative) {
                files.push(normalize(entry.path()).to_string_lossy().into_owned());
            }
        }
        files.sort();
        tracing::debug!(pattern, count = files.len(), "enumerated unit files");
        Ok(files)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
