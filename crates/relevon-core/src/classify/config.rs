use std::path::PathBuf;

use crate::classify::error::ClassifyError;

/// Default max sequence length for classifier tokenization.
pub const DEFAULT_CLASSIFIER_MAX_SEQ_LEN: usize = 512;

#[derive(Debug, Clone)]
/// Configuration for [`BertSensitivityClassifier`](super::BertSensitivityClassifier).
pub struct ClassifierConfig {
    /// Directory containing `config.json`, `model.safetensors`, and
    /// `tokenizer.json`.
    pub model_path: PathBuf,
    /// Max tokens to consider per chunk.
    pub max_seq_len: usize,
}

impl ClassifierConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            max_seq_len: DEFAULT_CLASSIFIER_MAX_SEQ_LEN,
        }
    }

    /// Validates that the model directory exists.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ClassifyError::InvalidConfig {
                reason: "model_path is required".to_string(),
            });
        }

        if !self.model_path.exists() {
            return Err(ClassifyError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        Ok(())
    }
}
