//! Lexical path helpers shared by the pipeline and the import scanner.

use std::path::{Component, Path, PathBuf};

/// Removes `.` components and folds `..` into its parent without touching the disk.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves `path` against `root` (absolute paths are kept) and renders it as a string.
#[must_use]
pub fn resolve_in(root: &Path, path: &str) -> String {
    normalize(&root.join(path)).to_string_lossy().into_owned()
}
