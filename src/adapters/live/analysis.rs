//! Live source analyzer: a lexical import scanner for JavaScript/TypeScript trees.
//!
//! Starting at the root files, every reachable script is scanned for module
//! specifiers (`import … from`, `export … from`, side-effect imports,
//! `require(…)` and dynamic `import(…)`). Relative specifiers are resolved
//! on disk and followed; bare specifiers name external packages and are
//! recorded under `node_modules/` without being followed.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::graph::{Location, RawReference, RawReferenceMap};
use crate::paths::normalize;
use crate::ports::analysis::SourceAnalyzer;

/// Extensions tried, in order, when a specifier omits one.
const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs"];

/// Files whose contents are scanned for further imports.
const SCANNED_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Emitted-extension specifiers that refer to TypeScript sources.
const SOURCE_FOR_EMITTED: &[(&str, &[&str])] =
    &[("js", &["ts", "tsx"]), ("jsx", &["tsx"]), ("mjs", &["mts"]), ("cjs", &["cts"])];

/// Pre-compiled regex for module specifiers in imports, re-exports and `require`.
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\b(?:require|import)\s*\(\s*|\bfrom\s*|\bimport\s*)['"]([^'"\r\n]+)['"]"#)
        .expect("valid regex")
});

/// Where a specifier points.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    /// A first-party file on disk.
    Local(PathBuf),
    /// A package outside the project tree.
    External(String),
}

/// Import scanner over the real file tree.
pub struct LiveSourceAnalyzer;

impl SourceAnalyzer for LiveSourceAnalyzer {
    fn references(
        &self,
        roots: &[String],
    ) -> Result<RawReferenceMap, Box<dyn std::error::Error + Send + Sync>> {
        let mut map = RawReferenceMap::new();
        let mut queued: HashSet<PathBuf> = HashSet::new();
        let mut queue: VecDeque<PathBuf> = VecDeque::new();

        for root in roots {
            let path = normalize(Path::new(root));
            if queued.insert(path.clone()) {
                queue.push_back(path);
            }
        }

        while let Some(file) = queue.pop_front() {
            if !is_scanned(&file) {
                continue;
            }
            let bytes = std::fs::read(&file)
                .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
            let source = String::from_utf8_lossy(&bytes);
            let importer = file.to_string_lossy().into_owned();

            for (specifier, location) in scan_specifiers(&source) {
                let target = match resolve_specifier(&file, specifier) {
                    Some(Target::Local(path)) => {
                        let name = path.to_string_lossy().into_owned();
                        if queued.insert(path.clone()) {
                            queue.push_back(path);
                        }
                        name
                    }
                    Some(Target::External(name)) => name,
                    None => {
                        tracing::debug!(importer = %importer, specifier, "unresolved relative import");
                        continue;
                    }
                };
                map.entry(target.clone()).or_default().push(RawReference {
                    file: importer.clone(),
                    referenced_file_name: target,
                    location: Some(location),
                });
            }
        }

        tracing::debug!(roots = roots.len(), files = queued.len(), origins = map.len(), "scanned imports");
        Ok(map)
    }
}

fn is_scanned(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| SCANNED_EXTENSIONS.contains(&ext))
}

/// Finds module specifiers with the 1-based position of each.
fn scan_specifiers(source: &str) -> Vec<(&str, Location)> {
    let line_starts: Vec<usize> =
        std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1)).collect();

    SPECIFIER_RE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let line = line_starts.partition_point(|&start| start <= m.start());
            let column = source[line_starts[line - 1]..m.start()].chars().count() + 1;
            let location = Location {
                line: u32::try_from(line).unwrap_or(u32::MAX),
                column: u32::try_from(column).unwrap_or(u32::MAX),
            };
            (m.as_str(), location)
        })
        .collect()
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// Resolves `specifier` as written in `importer`. `None` means a relative
/// specifier that names no file.
fn resolve_specifier(importer: &Path, specifier: &str) -> Option<Target> {
    if !is_relative(specifier) {
        return Some(Target::External(format!("node_modules/{specifier}")));
    }
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    let base = normalize(&dir.join(specifier));
    candidates(&base).into_iter().find(|p| p.is_file()).map(Target::Local)
}

fn candidates(base: &Path) -> Vec<PathBuf> {
    let mut out = vec![base.to_path_buf()];
    let text = base.to_string_lossy();

    if let Some(ext) = base.extension().and_then(|e| e.to_str()) {
        for (emitted, sources) in SOURCE_FOR_EMITTED {
            if ext == *emitted {
                out.extend(sources.iter().map(|s| base.with_extension(s)));
            }
        }
    }
    out.extend(RESOLVE_EXTENSIONS.iter().map(|ext| PathBuf::from(format!("{text}.{ext}"))));
    out.extend(RESOLVE_EXTENSIONS.iter().map(|ext| base.join(format!("index.{ext}"))));
    out
}
