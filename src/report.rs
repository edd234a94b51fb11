/*!
 * Console reporting for codecopy
 *
 * Everything the user sees goes through the reporter: the search
 * announcement, the tree, the summary lines and per-file diagnostics.
 */

use std::fmt::Display;

use colored::Colorize;

use crate::config::TreeStyle;
use crate::tokenizer::{Severity, TokenThresholds};
use crate::tree;
use crate::types::PipelineResult;

/// Width of the numeric column in the summary
const SUMMARY_WIDTH: usize = 6;

/// Report generator for pipeline results
pub struct Reporter {
    style: TreeStyle,
    thresholds: TokenThresholds,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(style: TreeStyle, thresholds: TokenThresholds) -> Self {
        Self { style, thresholds }
    }

    /// Line printed before collecting files
    pub fn search_message(&self, project_name: &str) -> String {
        format!("Searching files and copying contents of '{}' ...", project_name)
    }

    /// Line printed when no file matched
    pub fn empty_message(&self) -> String {
        "No files found to copy.".red().to_string()
    }

    /// The console tree in the configured style
    pub fn tree_text(&self, result: &PipelineResult) -> String {
        match self.style {
            TreeStyle::Annotated => tree::render_annotated(&result.nodes, &result.file_tokens),
            TreeStyle::Plain => result.tree.clone(),
        }
    }

    /// Summary block shown after the tree
    pub fn summary(&self, result: &PipelineResult, copied: bool) -> String {
        let count = result.files.len();
        let noun = if count == 1 { "file" } else { "files" };
        let headline = if copied {
            format!("{} {} copied to the clipboard.", count, noun).green()
        } else {
            format!("{} {} collected, clipboard not updated.", count, noun).yellow()
        };

        let tokens_line = format!(
            "Tokens:       {:>width$}",
            result.total_tokens,
            width = SUMMARY_WIDTH
        );

        format!(
            "{}\nCode lines:   {:>width$}\nTotal lines:  {:>width$}\n{}",
            headline,
            result.code_lines,
            result.raw_lines,
            self.colorize(&tokens_line, self.thresholds.classify(result.total_tokens)),
            width = SUMMARY_WIDTH
        )
    }

    /// Paint text according to a severity tier
    pub fn colorize(&self, text: &str, severity: Severity) -> String {
        match severity {
            Severity::Normal => text.to_string(),
            Severity::Warning => text.yellow().to_string(),
            Severity::Critical => text.red().to_string(),
        }
    }

    /// Format a diagnostic line
    pub fn diagnostic(&self, error: &dyn Display) -> String {
        format!("{}", error).red().to_string()
    }

    /// Print the search announcement
    pub fn print_search(&self, project_name: &str) {
        println!("\n{}", self.search_message(project_name));
    }

    /// Print the empty-result diagnostic
    pub fn print_empty(&self) {
        println!("\n{}", self.empty_message());
    }

    /// Print a diagnostic to stderr
    pub fn print_diagnostic(&self, error: &dyn Display) {
        eprintln!("{}", self.diagnostic(error));
    }

    /// Print the tree and summary
    pub fn print_report(&self, result: &PipelineResult, copied: bool) {
        println!("\n{}", self.tree_text(result));
        println!("\n{}", self.summary(result, copied));
    }
}
