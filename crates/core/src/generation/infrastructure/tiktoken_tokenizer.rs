use thiserror::Error;
use tiktoken_rs::CoreBPE;

use crate::generation::domain::prompt::PromptTokenizer;

#[derive(Error, Debug)]
#[error("failed to load tokenizer for model '{model}': {message}")]
pub struct TokenizerLoadError {
    pub model: String,
    pub message: String,
}

/// BPE tokenizer matching the chat model's encoding.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Models unknown to tiktoken fall back to `cl100k_base`.
    pub fn for_model(model: &str) -> Result<Self, TokenizerLoadError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .or_else(|_| {
                log::debug!("No tiktoken encoding for '{model}', using cl100k_base");
                tiktoken_rs::cl100k_base()
            })
            .map_err(|e| TokenizerLoadError {
                model: model.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { bpe })
    }
}

impl PromptTokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as u32)
            .collect()
    }

    fn decode(&self, tokens: &[u32]) -> Option<String> {
        self.bpe.decode(tokens.iter().map(|&t| t as _).collect()).ok()
    }
}
