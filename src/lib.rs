/*!
 * codecopy - Copy a project's source files into the clipboard as one LLM prompt
 *
 * This library collects source files, strips their comments, prepends a
 * directory tree and appends an instruction, then reports the payload's
 * size in tokens.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod stripper;
pub mod tokenizer;
pub mod tree;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{Args, Config, TreeStyle};
pub use error::{CodeCopyError, Result};
pub use pipeline::Pipeline;
pub use report::Reporter;
pub use scanner::Scanner;
pub use tokenizer::{Severity, TokenCounter, TokenModel, TokenThresholds};
pub use types::{FileEntry, FilterRule, Node, PipelineResult, RunOutcome};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
