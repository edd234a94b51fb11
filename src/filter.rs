/*!
 * File eligibility checks
 */

use std::collections::BTreeSet;
use std::path::Path;

use glob_match::glob_match;

use crate::utils::{ALWAYS_EXCLUDED_EXTENSIONS, ALWAYS_EXCLUDED_FILES};

/// Check if a file should be included
///
/// Rules are applied in order and the first match excludes the file:
/// fixed infrastructure denials, the extension allow-list (skipped when
/// empty), then the file name exclude patterns. Only the path is inspected.
pub fn is_included(
    path: &Path,
    allowed_extensions: &BTreeSet<String>,
    excluded_patterns: &[String],
) -> bool {
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_string());

    if is_always_excluded(&file_name, extension.as_deref()) {
        return false;
    }

    if !allowed_extensions.is_empty() {
        match &extension {
            Some(ext) if allowed_extensions.contains(&format!(".{}", ext)) => {}
            _ => return false,
        }
    }

    !excluded_patterns
        .iter()
        .any(|pattern| glob_match(pattern, &file_name))
}

fn is_always_excluded(file_name: &str, extension: Option<&str>) -> bool {
    if ALWAYS_EXCLUDED_FILES.contains(&file_name) {
        return true;
    }

    extension.is_some_and(|ext| {
        let ext = ext.to_lowercase();
        ALWAYS_EXCLUDED_EXTENSIONS.contains(&ext.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unrestricted_by_default() {
        assert!(is_included(Path::new("a.py"), &exts(&[]), &[]));
        assert!(is_included(Path::new("README"), &exts(&[]), &[]));
    }

    #[test]
    fn test_infrastructure_files_always_excluded() {
        let none = exts(&[]);
        assert!(!is_included(Path::new(".gitignore"), &none, &[]));
        assert!(!is_included(Path::new("favicon.ico"), &none, &[]));
        assert!(!is_included(Path::new("FAVICON.ICO"), &none, &[]));
        assert!(!is_included(Path::new("tool.exe"), &none, &[]));

        // Allow-listing does not override the fixed denials
        assert!(!is_included(Path::new("app.ico"), &exts(&[".ico"]), &[]));
    }

    #[test]
    fn test_extension_allow_list_is_case_sensitive() {
        let allowed = exts(&[".py"]);
        assert!(is_included(Path::new("src/a.py"), &allowed, &[]));
        assert!(!is_included(Path::new("src/b.txt"), &allowed, &[]));
        assert!(!is_included(Path::new("src/C.PY"), &allowed, &[]));
        assert!(!is_included(Path::new("Makefile"), &allowed, &[]));
    }

    #[test]
    fn test_exclude_patterns_beat_allowed_extension() {
        let allowed = exts(&[".py"]);
        let excluded = patterns(&["test*.py", "prompt_export.py"]);

        assert!(!is_included(Path::new("test_api.py"), &allowed, &excluded));
        assert!(!is_included(Path::new("pkg/testing.py"), &allowed, &excluded));
        assert!(!is_included(Path::new("prompt_export.py"), &allowed, &excluded));
        assert!(is_included(Path::new("api_test.py"), &allowed, &excluded));
    }
}
