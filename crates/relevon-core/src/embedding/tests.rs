use super::*;

fn stub_encoder() -> BertBiEncoder {
    BertBiEncoder::load(BiEncoderConfig::stub()).expect("stub loads without model files")
}

#[test]
fn test_stub_embedding_is_deterministic() {
    let encoder = stub_encoder();

    let a = encoder.embed("the stock market crashed").unwrap();
    let b = encoder.embed("the stock market crashed").unwrap();
    assert_eq!(a, b);

    let c = encoder.embed("a completely different text").unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_stub_embedding_is_unit_normalized() {
    let encoder = stub_encoder();
    let embedding = encoder.embed("some text to embed").unwrap();

    assert_eq!(embedding.len(), DEFAULT_EMBEDDING_DIM);
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
}

#[test]
fn test_embed_batch_preserves_order() {
    let encoder = stub_encoder();
    let texts = ["first", "second", "third"];

    let batch = encoder.embed_batch(&texts).unwrap();
    assert_eq!(batch.len(), 3);

    for (text, vector) in texts.iter().zip(&batch) {
        assert_eq!(&encoder.embed(text).unwrap(), vector);
    }
}

#[test]
fn test_embed_batch_empty() {
    let encoder = stub_encoder();
    assert!(encoder.embed_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_stub_reports_no_model() {
    let encoder = stub_encoder();
    assert!(encoder.is_stub());
    assert!(!encoder.has_model());
    assert_eq!(encoder.embedding_dim(), DEFAULT_EMBEDDING_DIM);
}

#[test]
fn test_load_rejects_missing_model_path() {
    let config = BiEncoderConfig::default();
    assert!(matches!(
        BertBiEncoder::load(config),
        Err(EmbeddingError::InvalidConfig { .. })
    ));

    let config = BiEncoderConfig::new("/nonexistent/model/dir");
    assert!(matches!(
        BertBiEncoder::load(config),
        Err(EmbeddingError::ModelNotFound { .. })
    ));
}

#[test]
fn test_model_available_requires_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = BiEncoderConfig::new(dir.path());
    assert!(!config.model_available());

    std::fs::write(dir.path().join("config.json"), "{}").unwrap();
    std::fs::write(dir.path().join("model.safetensors"), "").unwrap();
    assert!(!config.model_available());

    std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();
    assert!(config.model_available());
}

#[test]
fn test_mock_embedder_fixed_vectors() {
    let mock = MockEmbedder::new(vec![0.0, 1.0]).with_vector("finance", vec![1.0, 0.0]);

    let batch = mock.embed_batch(&["finance", "other"]).unwrap();
    assert_eq!(batch[0], vec![1.0, 0.0]);
    assert_eq!(batch[1], vec![0.0, 1.0]);
}

#[test]
fn test_mock_embedder_failing() {
    let mock = MockEmbedder::failing();
    assert!(mock.embed_batch(&["anything"]).is_err());
}
