//! Unit file path to unit name mapping.

use std::collections::HashSet;

/// Qualifier that marks a unit file without naming the unit.
pub const UNIT_QUALIFIER: &str = ".function";

/// Canonical unit name for a unit file.
///
/// Drops the directory, the final extension, and a trailing `.function`
/// qualifier: `src/auth/Login.function.ts` becomes `Login`.
#[must_use]
pub fn unit_name(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    match stem.strip_suffix(UNIT_QUALIFIER) {
        Some(name) if !name.is_empty() => name,
        _ => stem,
    }
}

/// Maps unit files to names, keeping the first occurrence of each name.
#[must_use]
pub fn resolve<S: AsRef<str>>(unit_files: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    unit_files
        .iter()
        .map(|path| unit_name(path.as_ref()))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_and_extension() {
        assert_eq!(unit_name("src/functions/sendEmail.ts"), "sendEmail");
        assert_eq!(unit_name("handler.js"), "handler");
        assert_eq!(unit_name("C:\\w\\functions\\win.ts"), "win");
    }

    #[test]
    fn strips_function_qualifier() {
        assert_eq!(unit_name("src/functions/a.function.ts"), "a");
        assert_eq!(unit_name("/abs/path/Foo.function.tsx"), "Foo");
    }

    #[test]
    fn keeps_names_without_extension() {
        assert_eq!(unit_name("functions/Makefile"), "Makefile");
        assert_eq!(unit_name("functions/.hidden"), ".hidden");
        assert_eq!(unit_name("x/.function.ts"), ".function");
    }

    #[test]
    fn deduplicates_names_in_first_seen_order() {
        let names = resolve(&["b/Zed.ts", "a/Foo.function.ts", "b/Foo.function.ts", "c/Zed.function.ts"]);
        assert_eq!(names, ["Zed", "Foo"]);
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        assert!(resolve::<&str>(&[]).is_empty());
    }
}
