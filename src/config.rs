/*!
 * Configuration handling for codecopy
 *
 * Settings come from an optional `codecopy.json` project file and from the
 * command line; command-line values win.
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::error::{CodeCopyError, Result};
use crate::tokenizer::{TokenModel, TokenThresholds};
use crate::types::FilterRule;
use crate::utils::DEFAULT_COMMENT;

/// Name of the project file read from the project directory
pub const CONFIG_FILE_NAME: &str = "codecopy.json";

/// How the tree is printed to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// Token count next to every file
    #[default]
    Annotated,
    /// Same listing as the payload header
    Plain,
}

/// Command-line arguments for codecopy
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "codecopy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a project's source files into the clipboard as one LLM prompt",
    long_about = "Collects the source files of a project, strips their comments, prepends a directory tree, appends an instruction and copies the result to the clipboard, reporting its size in tokens."
)]
pub struct Args {
    /// Project directory (or single file) to collect
    pub path: Option<String>,

    /// Project name shown in the report (defaults to the directory name)
    #[clap(long)]
    pub name: Option<String>,

    /// Comma-separated list of allowed extensions, e.g. `.py,.toml`
    #[clap(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Comma-separated list of directory names to skip
    #[clap(long, value_delimiter = ',')]
    pub exclude_dir: Vec<String>,

    /// Comma-separated list of file name patterns to skip, e.g. `test*.py`
    #[clap(long, value_delimiter = ',')]
    pub exclude_file: Vec<String>,

    /// Keep comments instead of stripping them
    #[clap(long)]
    pub keep_comments: bool,

    /// Instruction appended after the files
    #[clap(long, conflicts_with = "comment_file")]
    pub comment: Option<String>,

    /// Read the appended instruction from a file
    #[clap(long)]
    pub comment_file: Option<PathBuf>,

    /// Token count above which the total is shown as a warning
    #[clap(long)]
    pub warn_tokens: Option<usize>,

    /// Token count above which the total is shown as critical
    #[clap(long)]
    pub max_tokens: Option<usize>,

    /// Vocabulary used for token counting
    #[clap(long, value_enum)]
    pub model: Option<TokenModel>,

    /// Print the tree without token counts
    #[clap(long)]
    pub plain_tree: bool,

    /// Build and report the payload without touching the clipboard
    #[clap(long)]
    pub no_copy: bool,

    /// Project file to read instead of `<PATH>/codecopy.json`
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,

    /// Write a `codecopy.json` template into PATH and exit
    #[clap(long)]
    pub init: bool,

    /// Overwrite an existing project file with --init
    #[clap(long, requires = "init")]
    pub overwrite: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Contents of a `codecopy.json` project file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Relative to the directory containing the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
    pub allowed_extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub excluded_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<TokenThresholds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<TokenModel>,
}

impl ProjectFile {
    /// Read a project file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CodeCopyError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Name shown in the report
    pub project_name: String,

    /// Directory or file to collect
    pub project_path: PathBuf,

    /// Inclusion and exclusion rules
    pub filter: FilterRule,

    /// Whether comments are stripped
    pub remove_comments: bool,

    /// Instruction appended to the payload
    pub comment: String,

    /// Severity thresholds for the total token count
    pub thresholds: TokenThresholds,

    /// Vocabulary used for token counting
    pub model: TokenModel,

    /// Console tree style
    pub tree_style: TreeStyle,

    /// Whether the payload is placed on the clipboard
    pub copy_to_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_path: PathBuf::from("."),
            filter: FilterRule::default(),
            remove_comments: true,
            comment: DEFAULT_COMMENT.to_string(),
            thresholds: TokenThresholds::default(),
            model: TokenModel::default(),
            tree_style: TreeStyle::default(),
            copy_to_clipboard: true,
        }
    }
}

impl Config {
    /// Build the configuration from the command line and any project file
    pub fn load(args: Args) -> Result<Self> {
        let base = PathBuf::from(args.path.as_deref().unwrap_or("."));

        let file_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => {
                let candidate = base.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let (file, file_dir) = match file_path {
            Some(path) => {
                let dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (ProjectFile::read(&path)?, Some(dir))
            }
            None => (ProjectFile::default(), None),
        };

        Self::from_parts(args, file, file_dir)
    }

    /// Merge parsed arguments over a project file
    pub fn from_parts(args: Args, file: ProjectFile, file_dir: Option<PathBuf>) -> Result<Self> {
        let defaults = Self::default();

        let project_path = match (&args.path, &file.project_path, &file_dir) {
            (Some(path), _, _) => PathBuf::from(path),
            (None, Some(path), Some(dir)) => dir.join(path),
            (None, Some(path), None) => path.clone(),
            (None, None, Some(dir)) => dir.clone(),
            (None, None, None) => defaults.project_path,
        };

        let project_name = args
            .name
            .or(file.project_name)
            .unwrap_or_else(|| default_project_name(&project_path));

        let extensions = if args.extensions.is_empty() {
            file.allowed_extensions
        } else {
            args.extensions
        };
        let excluded_files: Vec<String> = file
            .excluded_files
            .into_iter()
            .chain(args.exclude_file)
            .collect();
        let excluded_dirs: Vec<String> = file
            .excluded_dirs
            .into_iter()
            .chain(args.exclude_dir)
            .collect();

        let comment = match (args.comment, args.comment_file) {
            (Some(comment), _) => comment,
            (None, Some(path)) => fs::read_to_string(&path).map_err(|e| {
                CodeCopyError::Config(format!("Cannot read {}: {}", path.display(), e))
            })?,
            (None, None) => file.comment.unwrap_or(defaults.comment),
        };

        let file_thresholds = file.thresholds.unwrap_or(defaults.thresholds);
        let thresholds = TokenThresholds {
            warning: args.warn_tokens.unwrap_or(file_thresholds.warning),
            critical: args.max_tokens.unwrap_or(file_thresholds.critical),
        };

        let remove_comments = if args.keep_comments {
            false
        } else {
            file.remove_comments.unwrap_or(defaults.remove_comments)
        };

        Ok(Self {
            project_name,
            project_path,
            filter: FilterRule::new(extensions, excluded_files, excluded_dirs),
            remove_comments,
            comment,
            thresholds,
            model: args.model.or(file.model).unwrap_or_default(),
            tree_style: if args.plain_tree {
                TreeStyle::Plain
            } else {
                TreeStyle::Annotated
            },
            copy_to_clipboard: !args.no_copy,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.project_path.exists() {
            return Err(CodeCopyError::RootNotFound(self.project_path.clone()));
        }

        crate::ensure!(
            self.thresholds.warning <= self.thresholds.critical,
            Config,
            "warning threshold ({}) must not exceed critical threshold ({})",
            self.thresholds.warning,
            self.thresholds.critical
        );

        Ok(())
    }
}

/// Directory name of a path, resolving `.` and friends first
fn default_project_name(path: &Path) -> String {
    fs::canonicalize(path)
        .ok()
        .as_deref()
        .unwrap_or(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("codecopy").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = Config::from_parts(parse(&[]), ProjectFile::default(), None)?;
        assert_eq!(config.project_path, PathBuf::from("."));
        assert!(config.remove_comments);
        assert_eq!(config.comment, DEFAULT_COMMENT);
        assert_eq!(config.thresholds, TokenThresholds::default());
        assert_eq!(config.tree_style, TreeStyle::Annotated);
        assert!(config.copy_to_clipboard);
        assert!(config.filter.allowed_extensions.is_empty());
        Ok(())
    }

    #[test]
    fn test_cli_overrides_project_file() -> Result<()> {
        let file = ProjectFile {
            project_name: Some("demo".to_string()),
            project_path: Some(PathBuf::from("src")),
            allowed_extensions: vec![".py".to_string()],
            excluded_dirs: vec!["favicons".to_string()],
            excluded_files: vec!["test*.py".to_string()],
            remove_comments: Some(true),
            comment: Some("from file".to_string()),
            thresholds: Some(TokenThresholds {
                warning: 100,
                critical: 200,
            }),
            model: Some(TokenModel::O200k),
        };
        let args = parse(&[
            "--ext",
            "rs,toml",
            "--exclude-dir",
            "target",
            "--exclude-file",
            "*.lock",
            "--keep-comments",
            "--max-tokens",
            "300",
            "--plain-tree",
            "--no-copy",
        ]);

        let config = Config::from_parts(args, file, Some(PathBuf::from("/work")))?;

        assert_eq!(config.project_name, "demo");
        assert_eq!(config.project_path, PathBuf::from("/work/src"));
        let exts: Vec<_> = config.filter.allowed_extensions.iter().cloned().collect();
        assert_eq!(exts, vec![".rs", ".toml"]);
        assert_eq!(config.filter.excluded_files, vec!["test*.py", "*.lock"]);
        assert!(config.filter.excluded_dirs.contains("favicons"));
        assert!(config.filter.excluded_dirs.contains("target"));
        assert!(!config.remove_comments);
        assert_eq!(config.comment, "from file");
        assert_eq!(config.thresholds.warning, 100);
        assert_eq!(config.thresholds.critical, 300);
        assert_eq!(config.model, TokenModel::O200k);
        assert_eq!(config.tree_style, TreeStyle::Plain);
        assert!(!config.copy_to_clipboard);
        Ok(())
    }

    #[test]
    fn test_load_reads_project_file_from_path() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{ "project_name": "fromfile", "allowed_extensions": ["py"], "remove_comments": false }"#,
        )?;

        let args = parse(&[temp_dir.path().to_str().unwrap()]);
        let config = Config::load(args)?;

        assert_eq!(config.project_name, "fromfile");
        assert!(config.filter.allowed_extensions.contains(".py"));
        assert!(!config.remove_comments);
        Ok(())
    }

    #[test]
    fn test_invalid_project_file_is_an_error() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json")?;

        let args = parse(&["--config", path.to_str().unwrap()]);
        assert!(matches!(Config::load(args), Err(CodeCopyError::Json(_))));
        Ok(())
    }

    #[test]
    fn test_validate() {
        let mut config = Config {
            project_path: PathBuf::from("/definitely/not/here"),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CodeCopyError::RootNotFound(_))
        ));

        config.project_path = PathBuf::from(".");
        config.thresholds = TokenThresholds {
            warning: 10,
            critical: 5,
        };
        assert!(matches!(config.validate(), Err(CodeCopyError::Config(_))));
    }
}
