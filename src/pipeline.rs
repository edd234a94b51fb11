/*!
 * Pipeline driver
 *
 * Collects the project's files, strips and concatenates them behind a tree
 * header, counts tokens, copies the payload and prints the report. Per-file
 * and clipboard failures are reported and skipped; only a missing project
 * root ends the run with an error.
 */

use std::collections::HashMap;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{CodeCopyError, Result};
use crate::report::Reporter;
use crate::scanner::Scanner;
use crate::stripper;
use crate::tokenizer::TokenCounter;
use crate::tree;
use crate::types::{flatten, FileEntry, Node, PipelineResult, ProcessedFile, RunOutcome};
use crate::utils::read_lossy;

/// First line of the payload
pub const PAYLOAD_HEADER: &str = "--- Directory structure / files ---";

/// Newlines between the last file block and the instruction
const COMMENT_SEPARATOR: &str = "\n\n\n\n";

/// One run over a configured project
pub struct Pipeline<'a> {
    config: &'a Config,
    counter: TokenCounter,
    clipboard: &'a dyn Clipboard,
    reporter: Reporter,
    progress: ProgressBar,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline; progress is shown only when stderr is a terminal
    pub fn new(config: &'a Config, counter: TokenCounter, clipboard: &'a dyn Clipboard) -> Self {
        let progress = if std::io::stderr().is_terminal() {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };

        Self {
            config,
            counter,
            clipboard,
            reporter: Reporter::new(config.tree_style, config.thresholds),
            progress,
        }
    }

    /// Replace the progress bar, e.g. with `ProgressBar::hidden()`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run every stage and print the outcome
    pub fn run(&self) -> Result<RunOutcome> {
        self.reporter.print_search(&self.config.project_name);

        let Some(result) = self.assemble()? else {
            self.reporter.print_empty();
            return Ok(RunOutcome::Empty);
        };

        for diagnostic in &result.diagnostics {
            self.reporter.print_diagnostic(diagnostic);
        }

        let copied = self.config.copy_to_clipboard && self.copy(&result.payload);

        self.reporter.print_report(&result, copied);

        Ok(RunOutcome::Completed {
            result: Box::new(result),
            copied,
        })
    }

    /// Copy the payload, reporting a failure instead of returning it
    fn copy(&self, payload: &str) -> bool {
        match self.clipboard.copy_to_clipboard(payload) {
            Ok(()) => true,
            Err(e) => {
                self.reporter.print_diagnostic(&CodeCopyError::from(e));
                false
            }
        }
    }

    /// Build the payload without touching the clipboard or the console
    ///
    /// Returns `None` when no file matched the filters.
    pub fn assemble(&self) -> Result<Option<PipelineResult>> {
        let nodes = self.scan()?;
        Ok(self.assemble_nodes(nodes))
    }

    /// Read, strip and concatenate the files of an already scanned tree
    pub(crate) fn assemble_nodes(&self, nodes: Vec<Node>) -> Option<PipelineResult> {
        let entries = flatten(&nodes);
        if entries.is_empty() {
            return None;
        }

        let tree_text = tree::render_plain(&nodes);
        let mut diagnostics = Vec::new();
        let mut files = Vec::with_capacity(entries.len());

        self.start_progress(entries.len());
        for entry in entries {
            self.progress.set_message(entry.display_relative());
            match self.process_file(entry) {
                Ok((file, warning)) => {
                    diagnostics.extend(warning);
                    files.push(file);
                }
                Err(e) => diagnostics.push(e),
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        let payload = build_payload(&tree_text, &files, &self.config.comment);
        let file_tokens: HashMap<PathBuf, usize> = files
            .iter()
            .map(|file| (file.entry.absolute_path.clone(), file.tokens))
            .collect();

        Some(PipelineResult {
            code_lines: files.iter().map(|f| f.lines.len()).sum(),
            raw_lines: files.iter().map(|f| f.raw_lines).sum(),
            total_tokens: self.counter.count(&payload),
            nodes,
            tree: tree_text,
            files,
            payload,
            file_tokens,
            diagnostics,
        })
    }

    /// Scan the project root
    pub(crate) fn scan(&self) -> Result<Vec<Node>> {
        let root = fs::canonicalize(&self.config.project_path)
            .map_err(|_| CodeCopyError::RootNotFound(self.config.project_path.clone()))?;

        // Relative paths of a single-file project start at its directory
        let project_root = if root.is_dir() {
            root.clone()
        } else {
            root.parent().map(PathBuf::from).unwrap_or_else(|| root.clone())
        };

        Scanner::new(&self.config.filter, project_root).scan(&[root])
    }

    /// Read one file and strip it
    ///
    /// A read failure drops the file. A strip failure keeps the raw lines
    /// and is returned alongside the file as a warning.
    fn process_file(
        &self,
        entry: FileEntry,
    ) -> Result<(ProcessedFile, Option<CodeCopyError>)> {
        let text = read_lossy(&entry.absolute_path).map_err(|source| CodeCopyError::FileRead {
            path: entry.absolute_path.clone(),
            source,
        })?;

        let raw = stripper::raw_lines(&text);
        let mut warning = None;

        let lines = if self.config.remove_comments {
            match stripper::strip(&entry.absolute_path, &text) {
                Ok(lines) => lines,
                Err(source) => {
                    warning = Some(CodeCopyError::Tokenization {
                        path: entry.absolute_path.clone(),
                        source,
                    });
                    raw.clone()
                }
            }
        } else {
            raw.clone()
        };

        let tokens = self.counter.count(&lines.join("\n"));

        Ok((
            ProcessedFile {
                entry,
                raw_lines: raw.len(),
                lines,
                tokens,
            },
            warning,
        ))
    }

    fn start_progress(&self, total: usize) {
        self.progress.set_length(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {bar:30.cyan/blue} {pos}/{len} {wide_msg:.dim}")
        {
            self.progress.set_style(style);
        }
    }
}

/// Concatenate the tree, every file block and the instruction
pub fn build_payload(tree_text: &str, files: &[ProcessedFile], comment: &str) -> String {
    let mut parts: Vec<String> = vec![PAYLOAD_HEADER.to_string(), tree_text.to_string(), String::new()];

    for file in files {
        let path = file.entry.display_relative();
        parts.push(format!("--- Start: {} ---", path));
        parts.extend(file.lines.iter().cloned());
        parts.push(format!("--- End: {} ---", path));
    }

    format!("{}{}{}", parts.join("\n"), COMMENT_SEPARATOR, comment)
}
