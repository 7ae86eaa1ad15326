//! Tests for the gateway: routing, multipart validation, and the
//! success/degrade paths of `relevance_handler`.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use relevon::classify::MockSensitivityModel;
use relevon::embedding::MockEmbedder;
use relevon::scoring::{ScoringParams, TopicRelevanceScorer};

use crate::gateway::state::HandlerState;
use crate::gateway::create_router_with_state;

const BOUNDARY: &str = "relevon-test-boundary";

const FINANCE_TEXT: &str = "A cat sat. A dog ran. The stock market crashed today.";

/// Router whose mock embedder scores every chunk at ~0.9 against "finance".
fn test_router() -> Router {
    let embedder = MockEmbedder::new(vec![0.9, (1.0f32 - 0.81).sqrt()])
        .with_vector("finance", vec![1.0, 0.0]);
    let scorer = TopicRelevanceScorer::new(Arc::new(embedder)).with_params(ScoringParams {
        max_chunk_chars: 550,
        ..Default::default()
    });
    create_router_with_state(HandlerState::new(Arc::new(scorer)))
}

fn test_router_with_classifier() -> Router {
    let embedder = MockEmbedder::new(vec![0.9, (1.0f32 - 0.81).sqrt()])
        .with_vector("finance", vec![1.0, 0.0]);
    let scorer = TopicRelevanceScorer::new(Arc::new(embedder))
        .with_classifier(Arc::new(MockSensitivityModel::new("toxic", 0.8)));
    create_router_with_state(HandlerState::new(Arc::new(scorer)))
}

/// Builds a raw multipart body from `(name, filename, content)` parts.
fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/model/bi-encoder/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_relevance_success() {
    let request = multipart_request(&[
        ("topic", None, b"finance"),
        ("file", Some("doc.txt"), FINANCE_TEXT.as_bytes()),
    ]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["label"], "highly_related");
    assert_eq!(json["method_used"], "bi_encoder");
    assert_eq!(json["chunk_count"], 1);
    assert_eq!(json["relevance_chunk_count"], 1);
    assert!((json["overall_score"].as_f64().unwrap() - 0.9).abs() < 1e-4);
    assert_eq!(json["evidence"].as_array().unwrap().len(), 1);
    assert!(json["sensitivity"].is_null());
}

#[tokio::test]
async fn test_relevance_missing_topic_is_422() {
    let request = multipart_request(&[("file", Some("doc.txt"), FINANCE_TEXT.as_bytes())]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("topic"));
    assert_eq!(json["body"], "topic");
}

#[tokio::test]
async fn test_relevance_blank_topic_is_422() {
    let request = multipart_request(&[
        ("topic", None, b"   "),
        ("file", Some("doc.txt"), FINANCE_TEXT.as_bytes()),
    ]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_relevance_missing_file_is_422() {
    let request = multipart_request(&[("topic", None, b"finance")]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_relevance_non_utf8_file_is_422() {
    let request = multipart_request(&[
        ("topic", None, b"finance"),
        ("file", Some("doc.bin"), &[0xff, 0xfe, 0x80, 0x81]),
    ]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("UTF-8"));
}

#[tokio::test]
async fn test_relevance_empty_file_short_circuits() {
    let request = multipart_request(&[
        ("topic", None, b"finance"),
        ("file", Some("empty.txt"), b""),
    ]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["chunk_count"], 0);
    assert_eq!(json["label"], "not_related");
    assert_eq!(json["method_used"], "none");
}

#[tokio::test]
async fn test_relevance_unknown_fields_ignored() {
    let request = multipart_request(&[
        ("extra", None, b"ignored"),
        ("topic", None, b"finance"),
        ("file", Some("doc.txt"), FINANCE_TEXT.as_bytes()),
    ]);

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_relevance_with_sensitivity() {
    let request = multipart_request(&[
        ("topic", None, b"finance"),
        ("file", Some("doc.txt"), FINANCE_TEXT.as_bytes()),
    ]);

    let response = test_router_with_classifier().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let sensitivity = &json["sensitivity"];
    assert!((sensitivity["sensitivity_score"].as_f64().unwrap() - 80.0).abs() < 1e-2);
    assert!(sensitivity["evidences"].is_object());
}

#[tokio::test]
async fn test_root_reports_capabilities() {
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["service"], "relevon");
    assert_eq!(json["embedder_mode"], "stub");
    assert_eq!(json["sensitivity_enabled"], false);
    assert!(
        json["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e.as_str().unwrap().contains("/model/bi-encoder/"))
    );
}

#[tokio::test]
async fn test_healthz() {
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}
