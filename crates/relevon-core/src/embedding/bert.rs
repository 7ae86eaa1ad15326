//! BERT bi-encoder (safetensors + tokenizer).
//!
//! Use [`BiEncoderConfig::stub`] for tests/examples without model files.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::config::BiEncoderConfig;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;
use crate::embedding::Embedder;

enum BiEncoderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        hidden_size: usize,
        device: Device,
    },
    Stub,
}

/// Sentence embedding generator: BERT forward pass, mean pooling over the
/// sequence, L2 normalization. Supports a deterministic stub mode.
pub struct BertBiEncoder {
    backend: BiEncoderBackend,
    config: BiEncoderConfig,
}

impl std::fmt::Debug for BertBiEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertBiEncoder")
            .field(
                "backend",
                &match &self.backend {
                    BiEncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    BiEncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl BertBiEncoder {
    /// Loads the bi-encoder from a config (stub mode is supported).
    pub fn load(config: BiEncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Bi-encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: BiEncoderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for bi-encoder");

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_path.clone(),
            });
        }

        let (model, tokenizer, hidden_size) =
            Self::load_model(&config.model_path, config.max_seq_len, &device)?;

        info!(
            model_path = %config.model_path.display(),
            hidden_size,
            max_seq_len = config.max_seq_len,
            "bi-encoder model loaded successfully"
        );

        Ok(Self {
            backend: BiEncoderBackend::Model {
                model,
                tokenizer,
                hidden_size,
                device,
            },
            config,
        })
    }

    fn load_model(
        model_dir: &Path,
        max_seq_len: usize,
        device: &Device,
    ) -> Result<(BertModel, Tokenizer, usize), EmbeddingError> {
        let tokenizer =
            load_tokenizer(model_dir, max_seq_len).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse model config: {}", e),
            })?;

        let weights_path = model_dir.join("model.safetensors");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)?
        };

        // Sentence-transformers exports omit the "bert." prefix; plain HF
        // checkpoints keep it.
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb, &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load BERT weights: {}", e),
        })?;

        let hidden_size = bert_config.hidden_size;

        Ok((model, tokenizer, hidden_size))
    }

    /// Generates an embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            BiEncoderBackend::Model {
                model,
                tokenizer,
                hidden_size,
                device,
            } => self.embed_with_model(text, model, tokenizer, *hidden_size, device),
            BiEncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        hidden_size: usize,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(vec![0.0; hidden_size]);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (BERT forward pass)"
        );

        // Input tensors: [1, seq_len]
        let input_ids = Tensor::new(&tokens[..], device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden_states = model.forward(&input_ids, &token_type_ids, None)?;

        // Mean pooling over the sequence dimension:
        // [1, seq_len, hidden] -> [1, hidden] -> [hidden]
        let pooled = hidden_states.mean(1)?.squeeze(0)?;
        let embedding = pooled.to_vec1::<f32>()?;

        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(embedding)
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        match &self.backend {
            BiEncoderBackend::Model { hidden_size, .. } => *hidden_size,
            BiEncoderBackend::Stub => self.config.embedding_dim,
        }
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, BiEncoderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &BiEncoderConfig {
        &self.config
    }
}

impl Embedder for BertBiEncoder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // Process sequentially (proper batching would need padding + masks).
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, BiEncoderBackend::Stub)
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
