use super::*;

fn classification(score: f32) -> ChunkClassification {
    ChunkClassification {
        label: "toxic".to_string(),
        score,
    }
}

#[test]
fn test_aggregate_empty_results() {
    let report = aggregate_sensitivity(&[], &[], 0.4);
    assert_eq!(report, SensitivityReport::empty());
    assert_eq!(report.sensitivity_score, 0.0);
    assert!(report.evidences.is_none());
}

#[test]
fn test_aggregate_mean_scaled_to_percent() {
    let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];
    let results = vec![classification(0.2), classification(0.4)];

    let report = aggregate_sensitivity(&chunks, &results, 0.9);
    assert!((report.sensitivity_score - 30.0).abs() < 1e-5);
    assert!(report.evidences.is_none());
}

#[test]
fn test_aggregate_collects_evidence_above_threshold() {
    let chunks = vec![
        "a harmless chunk".to_string(),
        "a flagged chunk".to_string(),
    ];
    let results = vec![classification(0.1), classification(0.8)];

    let report = aggregate_sensitivity(&chunks, &results, 0.4);
    let evidences = report.evidences.expect("one chunk crossed the threshold");
    assert_eq!(evidences.len(), 1);
    assert_eq!(evidences.get("a flagged chunk"), Some(&0.8));
}

#[test]
fn test_aggregate_threshold_is_strict() {
    let chunks = vec!["exactly at threshold".to_string()];
    let results = vec![classification(0.4)];

    let report = aggregate_sensitivity(&chunks, &results, 0.4);
    assert!(report.evidences.is_none());
}

#[test]
fn test_mock_model_scores_every_chunk() {
    let model = MockSensitivityModel::new("toxic", 0.7);
    let results = model.classify(&["one", "two"]).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].label, "toxic");
    assert_eq!(results[0].score, 0.7);
}

#[test]
fn test_mock_model_failing() {
    let model = MockSensitivityModel::failing();
    assert!(model.classify(&["anything"]).is_err());
}

#[test]
fn test_classifier_load_rejects_missing_path() {
    let config = ClassifierConfig::new("/nonexistent/classifier/dir");
    assert!(matches!(
        BertSensitivityClassifier::load(config),
        Err(ClassifyError::ModelNotFound { .. })
    ));
}

#[test]
fn test_report_serialization_shape() {
    let chunks = vec!["a flagged chunk".to_string()];
    let results = vec![classification(0.9)];
    let report = aggregate_sensitivity(&chunks, &results, 0.4);

    let json = serde_json::to_value(&report).unwrap();
    assert!((json["sensitivity_score"].as_f64().unwrap() - 90.0).abs() < 1e-3);
    assert!(json["evidences"]["a flagged chunk"].as_f64().unwrap() > 0.8);
}
