//! Tokenizer module for token counting
//!
//! Counts are advisory: they size the payload against a model's context
//! budget. When no backend can be loaded every count is zero and the run
//! carries on.

mod error;
mod model;
mod tiktoken;

// Re-exports for public API
pub use error::{TokenizerError, TokenizerResult};
pub use model::TokenModel;
pub use tiktoken::TiktokenTokenizer;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::Result;

/// Trait defining the interface for tokenizers
pub trait Tokenizer {
    /// Count tokens in the given text
    fn count_tokens(&self, text: &str) -> TokenizerResult<usize>;
}

/// Create a tokenizer for the specified model
pub fn create_tokenizer(model: TokenModel) -> TokenizerResult<Box<dyn Tokenizer>> {
    Ok(Box::new(TiktokenTokenizer::new(model)?))
}

/// Token counter that degrades to zero when the backend is missing or fails
pub struct TokenCounter {
    backend: Option<Box<dyn Tokenizer>>,
}

impl TokenCounter {
    /// Wrap an existing tokenizer
    pub fn new(backend: Box<dyn Tokenizer>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Counter that always reports zero
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Load the backend for a model
    ///
    /// Callers that can run without counts fall back to `unavailable()`.
    pub fn load(model: TokenModel) -> Result<Self> {
        Ok(Self::new(create_tokenizer(model)?))
    }

    /// Whether a backend is loaded
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Count tokens, reporting 0 instead of failing
    pub fn count(&self, text: &str) -> usize {
        self.backend
            .as_ref()
            .and_then(|backend| backend.count_tokens(text).ok())
            .unwrap_or(0)
    }
}

/// Severity of a token count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Token counts at which the payload is flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenThresholds {
    /// Counts above this are a warning
    pub warning: usize,
    /// Counts above this are critical
    pub critical: usize,
}

impl Default for TokenThresholds {
    fn default() -> Self {
        Self {
            warning: 12_500,
            critical: 16_000,
        }
    }
}

impl TokenThresholds {
    /// Classify a token count; both bounds are inclusive of the lower tier
    pub fn classify(&self, count: usize) -> Severity {
        if count > self.critical {
            Severity::Critical
        } else if count > self.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}
