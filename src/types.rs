/*!
 * Core types and data structures for codecopy
 */

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::CodeCopyError;
use crate::utils::{display_path, DEFAULT_EXCLUDED_DIRS, EXCLUDED_DIR_SUFFIXES};

/// Inclusion and exclusion rules for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRule {
    /// Allowed file extensions with a leading dot (empty allows everything)
    pub allowed_extensions: BTreeSet<String>,
    /// Glob patterns matched against file names
    pub excluded_files: Vec<String>,
    /// Directory names excluded in addition to the built-in deny-list
    pub excluded_dirs: BTreeSet<String>,
}

impl FilterRule {
    /// Create a rule, normalising extensions to the `.ext` form
    pub fn new<E, F, D>(allowed_extensions: E, excluded_files: F, excluded_dirs: D) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
            excluded_files: excluded_files.into_iter().map(Into::into).collect(),
            excluded_dirs: excluded_dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a file passes the filter
    pub fn is_included(&self, path: &Path) -> bool {
        crate::filter::is_included(path, &self.allowed_extensions, &self.excluded_files)
    }

    /// Check whether a directory must be pruned before descending into it
    pub fn is_pruned_dir(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        DEFAULT_EXCLUDED_DIRS.contains(&lower.as_str())
            || self.excluded_dirs.contains(name)
            || EXCLUDED_DIR_SUFFIXES
                .iter()
                .any(|suffix| lower.ends_with(suffix))
    }
}

/// Turn `py`, `.py` or ` .py ` into `.py`
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{}", ext))
    }
}

/// A collected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Resolved absolute path
    pub absolute_path: PathBuf,
    /// Path relative to the project root
    pub relative_path: PathBuf,
}

impl FileEntry {
    /// Relative path with `/` separators, as used in the payload markers
    pub fn display_relative(&self) -> String {
        display_path(&self.relative_path)
    }

    /// File name of the entry
    pub fn name(&self) -> String {
        self.absolute_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Represents a retained directory in the scanned tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Resolved absolute path
    pub path: PathBuf,
    /// Children sorted by name
    pub contents: Vec<Node>,
}

/// A node of the scanned tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Directory node
    Directory(DirectoryNode),
    /// Accepted file
    File(FileEntry),
}

impl Node {
    /// Display name of the node
    pub fn name(&self) -> String {
        match self {
            Node::Directory(dir) => dir.name.clone(),
            Node::File(entry) => entry.name(),
        }
    }

    /// Append every file below this node in traversal order
    pub fn collect_files(&self, out: &mut Vec<FileEntry>) {
        match self {
            Node::File(entry) => out.push(entry.clone()),
            Node::Directory(dir) => {
                for child in &dir.contents {
                    child.collect_files(out);
                }
            }
        }
    }
}

/// Flatten scanned roots into the ordered file list
pub fn flatten(nodes: &[Node]) -> Vec<FileEntry> {
    let mut files = Vec::new();
    for node in nodes {
        node.collect_files(&mut files);
    }
    files
}

/// One rendered row of the directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Nesting depth, roots are 0
    pub depth: usize,
    /// Whether this entry is the last of its siblings
    pub is_last: bool,
    /// Connector prefix (`│   ├── ` and friends)
    pub prefix: String,
    /// Entry name
    pub name: String,
    /// Token count for file lines in annotated mode
    pub tokens: Option<usize>,
}

impl TreeLine {
    /// Prefix and name as they appear on screen
    pub fn label(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// A file after reading and optional comment stripping
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub entry: FileEntry,
    /// Lines placed into the payload
    pub lines: Vec<String>,
    /// Line count of the file as read from disk
    pub raw_lines: usize,
    /// Tokens of the cleaned content
    pub tokens: usize,
}

/// Everything produced by one pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    /// Scanned tree the listing and payload were derived from
    pub nodes: Vec<Node>,
    /// Plain tree listing embedded in the payload
    pub tree: String,
    /// Files in payload order
    pub files: Vec<ProcessedFile>,
    /// Cleaned lines across all files
    pub code_lines: usize,
    /// Raw lines across all files
    pub raw_lines: usize,
    /// Text placed on the clipboard
    pub payload: String,
    /// Tokens of the whole payload
    pub total_tokens: usize,
    /// Tokens per file, keyed by absolute path
    pub file_tokens: HashMap<PathBuf, usize>,
    /// Per-file problems that did not stop the run
    pub diagnostics: Vec<CodeCopyError>,
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// No file matched the filters; nothing was copied
    Empty,
    /// The payload was built; `copied` tells whether the clipboard accepted it
    Completed {
        result: Box<PipelineResult>,
        copied: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("py").as_deref(), Some(".py"));
        assert_eq!(normalize_extension(".rs").as_deref(), Some(".rs"));
        assert_eq!(normalize_extension(" .md ").as_deref(), Some(".md"));
        assert_eq!(normalize_extension(""), None);
        assert_eq!(normalize_extension("."), None);
    }

    #[test]
    fn test_pruned_dirs() {
        let rule = FilterRule::new(Vec::<String>::new(), Vec::<String>::new(), ["favicons"]);

        assert!(rule.is_pruned_dir("node_modules"));
        assert!(rule.is_pruned_dir("Node_Modules"));
        assert!(rule.is_pruned_dir("__pycache__"));
        assert!(rule.is_pruned_dir("favicons"));
        assert!(rule.is_pruned_dir("mypkg.egg-info"));
        assert!(rule.is_pruned_dir(".pytest_cache"));

        // User exclusions are matched exactly
        assert!(!rule.is_pruned_dir("Favicons"));
        assert!(!rule.is_pruned_dir("src"));
    }

    #[test]
    fn test_flatten_keeps_traversal_order() {
        let entry = |name: &str| FileEntry {
            absolute_path: PathBuf::from("/p").join(name),
            relative_path: PathBuf::from(name),
        };
        let nodes = vec![Node::Directory(DirectoryNode {
            name: "p".to_string(),
            path: PathBuf::from("/p"),
            contents: vec![
                Node::File(entry("a.py")),
                Node::Directory(DirectoryNode {
                    name: "b".to_string(),
                    path: PathBuf::from("/p/b"),
                    contents: vec![Node::File(entry("b/c.py"))],
                }),
                Node::File(entry("d.py")),
            ],
        })];

        let names: Vec<_> = flatten(&nodes)
            .iter()
            .map(FileEntry::display_relative)
            .collect();
        assert_eq!(names, vec!["a.py", "b/c.py", "d.py"]);
    }
}
