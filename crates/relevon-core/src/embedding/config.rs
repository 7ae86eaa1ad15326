use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default bi-encoder embedding dimension (all-MiniLM-L6-v2 hidden size).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default max sequence length for bi-encoder tokenization.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

#[derive(Debug, Clone)]
/// Configuration for [`BertBiEncoder`](super::BertBiEncoder).
pub struct BiEncoderConfig {
    /// Directory containing `config.json`, `model.safetensors`, and
    /// `tokenizer.json`.
    pub model_path: PathBuf,
    /// Max tokens to consider per text.
    pub max_seq_len: usize,
    /// Output embedding dimension (stub mode only; the real model's hidden
    /// size wins when a model is loaded).
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for BiEncoderConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl BiEncoderConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_path.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        Ok(())
    }

    /// Returns `true` if the expected model files exist.
    pub fn model_available(&self) -> bool {
        !self.model_path.as_os_str().is_empty()
            && self.model_path.join("config.json").exists()
            && self.model_path.join("model.safetensors").exists()
            && self.model_path.join("tokenizer.json").exists()
    }
}
