//! BERT sequence classifier (safetensors + tokenizer).

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::classify::config::ClassifierConfig;
use crate::classify::error::ClassifyError;
use crate::classify::{ChunkClassification, SensitivityModel};
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer;

/// Multi-label BERT classifier: CLS-token pooling, linear head, sigmoid.
///
/// The label set is read from `id2label` in the model's `config.json`
/// (`unitary/toxic-bert` layout); the top label per chunk is returned.
pub struct BertSensitivityClassifier {
    bert: BertModel,
    classifier: Linear,
    labels: Vec<String>,
    tokenizer: Tokenizer,
    device: Device,
}

impl std::fmt::Debug for BertSensitivityClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertSensitivityClassifier")
            .field("labels", &self.labels)
            .field("device", &self.device)
            .finish()
    }
}

impl BertSensitivityClassifier {
    /// Loads the classifier from a model directory.
    pub fn load(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        config.validate()?;

        let device = select_device().map_err(|e| ClassifyError::ModelLoadFailed {
            reason: e.to_string(),
        })?;

        let tokenizer = load_tokenizer(&config.model_path, config.max_seq_len).map_err(|e| {
            ClassifyError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let config_content = std::fs::read_to_string(config.model_path.join("config.json"))?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| ClassifyError::ModelLoadFailed {
                reason: format!("Failed to parse model config: {}", e),
            })?;
        let labels = parse_labels(&config_content);

        let weights_path = config.model_path.join("model.safetensors");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| ClassifyError::ModelLoadFailed {
                    reason: e.to_string(),
                })?
        };

        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb.clone(), &bert_config)
        }
        .map_err(|e| ClassifyError::ModelLoadFailed {
            reason: format!("Failed to load BERT weights: {}", e),
        })?;

        let classifier = candle_nn::linear(bert_config.hidden_size, labels.len(), vb.pp("classifier"))
            .map_err(|e| ClassifyError::ModelLoadFailed {
                reason: format!("Failed to load classifier head: {}", e),
            })?;

        info!(
            model_path = %config.model_path.display(),
            num_labels = labels.len(),
            "classifier model loaded successfully"
        );

        Ok(Self {
            bert,
            classifier,
            labels,
            tokenizer,
            device,
        })
    }

    fn classify_one(&self, text: &str) -> Result<ChunkClassification, ClassifyError> {
        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| ClassifyError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(ChunkClassification {
                label: self.labels[0].clone(),
                score: 0.0,
            });
        }

        debug!(text_len = text.len(), token_count = tokens.len(), "Classifying chunk");

        let input_ids = Tensor::new(&tokens[..], &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden_states = self.bert.forward(&input_ids, &token_type_ids, None)?;

        // CLS-token pooling: [1, seq, hidden] -> [1, hidden] -> [1, num_labels]
        let cls_token = hidden_states.i((.., 0, ..))?;
        let logits = self.classifier.forward(&cls_token)?;

        // Multi-label head: independent sigmoids, top label wins.
        let scores = candle_nn::ops::sigmoid(&logits)?.squeeze(0)?.to_vec1::<f32>()?;

        let (top_idx, top_score) = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, s)| (i, *s))
            .unwrap_or((0, 0.0));

        Ok(ChunkClassification {
            label: self.labels[top_idx].clone(),
            score: top_score,
        })
    }
}

impl SensitivityModel for BertSensitivityClassifier {
    fn classify(&self, texts: &[&str]) -> Result<Vec<ChunkClassification>, ClassifyError> {
        texts.iter().map(|text| self.classify_one(text)).collect()
    }
}

/// Reads the ordered label list from `id2label` in a raw `config.json`.
///
/// Falls back to a single `"sensitive"` logit when the mapping is absent.
fn parse_labels(config_content: &str) -> Vec<String> {
    let raw: serde_json::Value = match serde_json::from_str(config_content) {
        Ok(value) => value,
        Err(_) => return vec!["sensitive".to_string()],
    };

    let Some(map) = raw.get("id2label").and_then(|v| v.as_object()) else {
        return vec!["sensitive".to_string()];
    };

    let mut entries: Vec<(usize, String)> = map
        .iter()
        .filter_map(|(k, v)| {
            let idx: usize = k.parse().ok()?;
            let label = v.as_str()?.to_string();
            Some((idx, label))
        })
        .collect();

    if entries.is_empty() {
        return vec!["sensitive".to_string()];
    }

    entries.sort_by_key(|(idx, _)| *idx);
    entries.into_iter().map(|(_, label)| label).collect()
}

#[cfg(test)]
mod bert_tests {
    use super::parse_labels;

    #[test]
    fn test_parse_labels_ordered_by_index() {
        let config = r#"{"id2label": {"1": "insult", "0": "toxic", "2": "threat"}}"#;
        assert_eq!(parse_labels(config), vec!["toxic", "insult", "threat"]);
    }

    #[test]
    fn test_parse_labels_missing_mapping() {
        assert_eq!(parse_labels("{}"), vec!["sensitive"]);
        assert_eq!(parse_labels("not json"), vec!["sensitive"]);
    }
}
