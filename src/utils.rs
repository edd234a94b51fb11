/*!
 * Utility functions and fixed tables for codecopy
 */

use std::fs;
use std::io;
use std::path::{Component, Path};

/// Directory names that are never traversed (compared lowercased)
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "migrations",
    "__pycache__",
    "node_modules",
    ".git",
    ".idea",
    ".venv",
];

/// Build-artifact directory suffixes that are never traversed (compared lowercased)
pub const EXCLUDED_DIR_SUFFIXES: &[&str] = &[".egg-info", ".dist-info", "_cache"];

/// File names that are always excluded
pub const ALWAYS_EXCLUDED_FILES: &[&str] = &[".gitignore"];

/// File extensions that are always excluded (compared lowercased, without dot)
pub const ALWAYS_EXCLUDED_EXTENSIONS: &[&str] = &["ico", "exe", "dll", "so", "dylib"];

/// Instruction appended to the payload when none is configured
pub const DEFAULT_COMMENT: &str = "\
Only make the changes that are explicitly requested.
Output every changed file completely, from start to end, in its own code block, starting with the file path.
Do not show unchanged files; write <no change> instead.
Keep formatting, comments, ordering and imports exactly as they are.
No renames, auto-formatting, re-sorting, unnecessary comments or backslashes.
Use best practices.
Changes must not break existing functionality.
If anything is unclear: ask, do not guess.
";

/// Read a file as text, replacing invalid UTF-8 sequences
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render a path with `/` separators regardless of platform
pub fn display_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(&PathBuf::from("src/core/a.py")), "src/core/a.py");
        assert_eq!(display_path(&PathBuf::from("./a.py")), "a.py");
        assert_eq!(display_path(&PathBuf::from("")), "");
    }

    #[test]
    fn test_read_lossy_replaces_invalid_bytes() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mixed.py");
        fs::write(&path, b"x = 1\n\xff\xfe y = 2\n")?;

        let text = read_lossy(&path)?;
        assert!(text.starts_with("x = 1\n"));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with("y = 2\n"));
        Ok(())
    }
}
