//! Mock sensitivity model for tests (feature `mock`).

use super::{ChunkClassification, ClassifyError, SensitivityModel};

/// Test classifier returning a fixed score for every chunk.
#[derive(Debug, Clone)]
pub struct MockSensitivityModel {
    label: String,
    score: f32,
    fail: bool,
}

impl MockSensitivityModel {
    /// Creates a mock classifying every chunk as `label` with `score`.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
            fail: false,
        }
    }

    /// Creates a mock that fails every `classify` call.
    pub fn failing() -> Self {
        Self {
            label: String::new(),
            score: 0.0,
            fail: true,
        }
    }
}

impl SensitivityModel for MockSensitivityModel {
    fn classify(&self, texts: &[&str]) -> Result<Vec<ChunkClassification>, ClassifyError> {
        if self.fail {
            return Err(ClassifyError::InferenceFailed {
                reason: "mock classifier configured to fail".to_string(),
            });
        }

        Ok(texts
            .iter()
            .map(|_| ChunkClassification {
                label: self.label.clone(),
                score: self.score,
            })
            .collect())
    }
}
