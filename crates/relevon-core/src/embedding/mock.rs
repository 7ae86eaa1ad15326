//! Mock embedder for tests (feature `mock`).

use std::collections::HashMap;

use super::{Embedder, EmbeddingError};

/// Test embedder returning fixed vectors per text.
///
/// Texts without a registered vector get `default_vector`. Construct with
/// [`MockEmbedder::failing`] to exercise the degrade-to-zeros path.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    fail: bool,
}

impl MockEmbedder {
    /// Creates a mock whose unregistered texts embed to `default_vector`.
    pub fn new(default_vector: Vec<f32>) -> Self {
        Self {
            vectors: HashMap::new(),
            default_vector,
            fail: false,
        }
    }

    /// Creates a mock that fails every `embed_batch` call.
    pub fn failing() -> Self {
        Self {
            vectors: HashMap::new(),
            default_vector: vec![1.0, 0.0],
            fail: true,
        }
    }

    /// Registers a fixed vector for an exact text.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }
}

impl Embedder for MockEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock embedder configured to fail".to_string(),
            });
        }

        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| self.default_vector.clone())
            })
            .collect())
    }

    fn is_stub(&self) -> bool {
        true
    }
}
