//! tiktoken-backed tokenizer

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, CoreBPE};

use super::error::{TokenizerError, TokenizerResult};
use super::model::TokenModel;
use super::Tokenizer;

// Vocabularies are parsed once per process on first use
static CL100K: Lazy<Result<CoreBPE, String>> = Lazy::new(|| cl100k_base().map_err(|e| e.to_string()));
static O200K: Lazy<Result<CoreBPE, String>> = Lazy::new(|| o200k_base().map_err(|e| e.to_string()));
static P50K: Lazy<Result<CoreBPE, String>> = Lazy::new(|| p50k_base().map_err(|e| e.to_string()));

/// Tokenizer using a fixed tiktoken vocabulary
pub struct TiktokenTokenizer {
    encoding: &'static CoreBPE,
}

impl TiktokenTokenizer {
    /// Load the vocabulary for a model
    pub fn new(model: TokenModel) -> TokenizerResult<Self> {
        let loaded = match model {
            TokenModel::Cl100k => &*CL100K,
            TokenModel::O200k => &*O200K,
            TokenModel::P50k => &*P50K,
        };

        match loaded {
            Ok(encoding) => Ok(Self { encoding }),
            Err(reason) => Err(TokenizerError::EncodingUnavailable {
                encoding: model.encoding(),
                reason: reason.clone(),
            }),
        }
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> TokenizerResult<usize> {
        Ok(self.encoding.encode_ordinary(text).len())
    }
}
