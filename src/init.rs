/*!
 * Project file scaffolding
 *
 * `codecopy --init` writes a starter `codecopy.json` and keeps it out of
 * version control.
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{ProjectFile, CONFIG_FILE_NAME};
use crate::error::{CodeCopyError, Result};
use crate::utils::DEFAULT_COMMENT;

/// Entry appended to `.gitignore`
pub const IGNORE_ENTRY: &str = "/codecopy.json";

/// What `init_project` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new project file was written
    Created(PathBuf),
    /// An existing project file was replaced
    Overwritten(PathBuf),
    /// A project file already existed and was left alone
    Skipped(PathBuf),
}

/// Starter project file for a directory
pub fn template(dir: &Path) -> ProjectFile {
    let name = fs::canonicalize(dir)
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "project".to_string());

    ProjectFile {
        project_name: Some(name),
        project_path: Some(PathBuf::from(".")),
        allowed_extensions: vec![".py".to_string()],
        excluded_dirs: vec!["favicons".to_string()],
        excluded_files: vec!["test*.py".to_string(), CONFIG_FILE_NAME.to_string()],
        remove_comments: Some(true),
        comment: Some(DEFAULT_COMMENT.to_string()),
        thresholds: None,
        model: None,
    }
}

/// Write `codecopy.json` into `dir`
///
/// An existing file is only replaced when `overwrite` is set.
pub fn init_project(dir: &Path, overwrite: bool) -> Result<InitOutcome> {
    let path = dir.join(CONFIG_FILE_NAME);
    let existed = path.exists();
    if existed && !overwrite {
        return Ok(InitOutcome::Skipped(path));
    }

    let mut json = serde_json::to_string_pretty(&template(dir))?;
    json.push('\n');
    fs::write(&path, json).map_err(|source| CodeCopyError::ConfigWrite {
        path: path.clone(),
        source,
    })?;

    Ok(if existed {
        InitOutcome::Overwritten(path)
    } else {
        InitOutcome::Created(path)
    })
}

/// Append `entry` to an ignore file unless a line already matches it
///
/// Returns whether the file was changed. A missing file is created.
pub fn ensure_ignore_entry(ignore_file: &Path, entry: &str) -> Result<bool> {
    let write_error = |source| CodeCopyError::ConfigWrite {
        path: ignore_file.to_path_buf(),
        source,
    };

    let existing = if ignore_file.exists() {
        fs::read_to_string(ignore_file).map_err(write_error)?
    } else {
        String::new()
    };

    if existing.lines().any(|line| line.trim() == entry) {
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ignore_file)
        .map_err(write_error)?;

    let separator = if existing.is_empty() || existing.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    writeln!(file, "{}{}", separator, entry).map_err(write_error)?;

    Ok(true)
}
