//! Encodings available for token counting

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumProperty};

/// Supported BPE vocabularies
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    Display,
    ValueEnum,
    Serialize,
    Deserialize,
    EnumProperty,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenModel {
    /// GPT-4 / GPT-3.5 vocabulary, a close approximation for Claude as well
    #[default]
    #[strum(props(encoding = "cl100k_base"))]
    Cl100k,

    /// GPT-4o vocabulary
    #[strum(props(encoding = "o200k_base"))]
    O200k,

    /// Codex / text-davinci vocabulary
    #[strum(props(encoding = "p50k_base"))]
    P50k,
}

impl TokenModel {
    /// Name of the tiktoken encoding backing this model
    pub fn encoding(&self) -> &'static str {
        self.get_str("encoding").unwrap_or("cl100k_base")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_model_names_an_encoding() {
        for model in TokenModel::iter() {
            assert!(model.encoding().ends_with("_base"), "{}", model);
        }
        assert_eq!(TokenModel::default().encoding(), "cl100k_base");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TokenModel::O200k).unwrap();
        assert_eq!(json, "\"o200k\"");
        let model: TokenModel = serde_json::from_str("\"p50k\"").unwrap();
        assert_eq!(model, TokenModel::P50k);
    }
}
