//! Embedding + model utilities.
//!
//! - [`BertBiEncoder`] encodes texts into unit-normalized vectors via a
//!   candle BERT model with mean pooling (stub mode supported).
//! - [`Embedder`] is the seam the scoring pipeline depends on, so tests can
//!   substitute a [`MockEmbedder`].

/// BERT bi-encoder wrapper.
pub mod bert;
/// Bi-encoder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Tokenizer loading helpers.
pub(crate) mod utils;

#[cfg(test)]
mod tests;

pub use bert::BertBiEncoder;
pub use config::{BiEncoderConfig, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

/// Capability: texts in, unit-normalized fixed-length vectors out.
///
/// Implementations must be deterministic for a given model and input, and
/// safe to share read-only across concurrent requests.
pub trait Embedder: Send + Sync {
    /// Encodes every text into a unit-normalized embedding vector, in order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Returns `true` if this embedder runs without a real model.
    fn is_stub(&self) -> bool {
        false
    }
}
