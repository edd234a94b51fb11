/*!
 * Directory scanning functionality
 *
 * The scanner walks each root once and produces a tree of retained nodes.
 * Both the tree listing and the payload file list are derived from that
 * tree, so what is shown and what is copied can never diverge.
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{CodeCopyError, Result};
use crate::types::{flatten, DirectoryNode, FileEntry, FilterRule, Node};

/// Scanner for project contents
pub struct Scanner<'a> {
    /// Filter applied to files and directories
    rule: &'a FilterRule,
    /// Root that relative paths are computed against
    project_root: PathBuf,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(rule: &'a FilterRule, project_root: impl Into<PathBuf>) -> Self {
        Self {
            rule,
            project_root: project_root.into(),
        }
    }

    /// Collect eligible files under all roots in traversal order
    pub fn collect(&self, roots: &[PathBuf]) -> Result<Vec<FileEntry>> {
        Ok(flatten(&self.scan(roots)?))
    }

    /// Scan all roots and return the retained nodes
    ///
    /// A missing root fails the whole scan. A file root that the filter
    /// rejects yields no node.
    pub fn scan(&self, roots: &[PathBuf]) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(roots.len());

        for root in roots {
            let abs_path = fs::canonicalize(root)
                .map_err(|_| CodeCopyError::RootNotFound(root.clone()))?;

            if abs_path.is_dir() {
                nodes.push(Node::Directory(self.scan_directory(&abs_path)));
            } else if self.rule.is_included(&abs_path) {
                nodes.push(Node::File(self.file_entry(&abs_path)));
            }
        }

        Ok(nodes)
    }

    /// Scan a directory and return its node representation
    ///
    /// Unreadable directories produce an empty node rather than an error.
    fn scan_directory(&self, abs_path: &Path) -> DirectoryNode {
        let entries: Vec<DirEntry> = WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .collect();

        let mut contents = Vec::with_capacity(entries.len());

        for entry in entries {
            let file_type = entry.file_type();

            if file_type.is_dir() {
                let name = entry.file_name().to_string_lossy();
                if self.rule.is_pruned_dir(&name) {
                    continue;
                }
                contents.push(Node::Directory(self.scan_directory(entry.path())));
            } else if self.is_file(&entry) && self.rule.is_included(entry.path()) {
                contents.push(Node::File(self.file_entry(entry.path())));
            }
        }

        DirectoryNode {
            name: dir_name(abs_path),
            path: abs_path.to_path_buf(),
            contents,
        }
    }

    /// Regular files and symlinks that resolve to regular files
    fn is_file(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
    }

    fn file_entry(&self, abs_path: &Path) -> FileEntry {
        let relative_path = abs_path
            .strip_prefix(&self.project_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(abs_path.file_name().unwrap_or_default()));

        FileEntry {
            absolute_path: abs_path.to_path_buf(),
            relative_path,
        }
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
