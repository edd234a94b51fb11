//! Error types for the tokenizer module

use thiserror::Error;

/// Result type for tokenizer operations
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Errors that can occur during tokenization
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The BPE vocabulary could not be loaded
    #[error("Failed to load encoding {encoding}: {reason}")]
    EncodingUnavailable {
        encoding: &'static str,
        reason: String,
    },
}
