//! Project files port for enumerating unit files.

use std::path::Path;

/// Enumerates files inside the project tree.
pub trait ProjectFiles: Send + Sync {
    /// Lists files under `root` whose root-relative path matches `pattern`.
    ///
    /// Paths are absolute and sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob is invalid or the tree cannot be walked.
    fn glob(
        &self,
        root: &Path,
        pattern: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
