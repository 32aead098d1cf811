//! End-to-end tests for the HTTP surface against an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use sentiscope::analysis::Analyzer;
use sentiscope::classifier::{Sentiment, SentimentClassifier};
use sentiscope::db::HistoryStore;
use sentiscope::db::libsql::LibSqlBackend;
use sentiscope::error::ClassifierError;
use sentiscope::web::{AppState, routes};

/// Labels anything mentioning "hate" as negative, everything else positive.
struct StubClassifier;

#[async_trait]
impl SentimentClassifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        if text.contains("hate") {
            Ok(Sentiment::new("NEGATIVE", 0.9912))
        } else {
            Ok(Sentiment::new("POSITIVE", 0.9987))
        }
    }
}

struct UnavailableClassifier;

#[async_trait]
impl SentimentClassifier for UnavailableClassifier {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn classify(&self, _text: &str) -> Result<Sentiment, ClassifierError> {
        Err(ClassifierError::RequestFailed {
            backend: "unavailable".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

async fn setup_with(classifier: Arc<dyn SentimentClassifier>) -> (Router, Arc<dyn HistoryStore>) {
    let backend = LibSqlBackend::new_memory().await.unwrap();
    backend.run_migrations().await.unwrap();
    let store: Arc<dyn HistoryStore> = Arc::new(backend);

    let analyzer = Analyzer::new(classifier, Arc::clone(&store), 10);
    let app = routes(Arc::new(AppState::new(analyzer)));
    (app, store)
}

async fn setup() -> (Router, Arc<dyn HistoryStore>) {
    setup_with(Arc::new(StubClassifier)).await
}

fn api_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn home_request() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn api_analyze_returns_label_and_score() {
    let (app, store) = setup().await;

    let (status, body) = send(&app, api_request(r#"{"text": "I love this product"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["label"], "POSITIVE");
    let score = json["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert_eq!(json.as_object().unwrap().len(), 2);

    let records = store.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "I love this product");
}

#[tokio::test]
async fn api_analyze_stores_text_verbatim() {
    let (app, store) = setup().await;

    let (status, _) = send(&app, api_request(r#"{"text": "  spaced \t out\n"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let records = store.recent(1).await.unwrap();
    assert_eq!(records[0].text, "  spaced \t out\n");
}

#[tokio::test]
async fn api_analyze_rejects_missing_or_blank_text() {
    let (app, store) = setup().await;

    for body in [
        r#"{}"#,
        r#"{"text": null}"#,
        r#"{"text": ""}"#,
        r#"{"text": "   \n\t "}"#,
        r#"{"text": 42}"#,
        "not json",
    ] {
        let (status, resp) = send(&app, api_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(resp, r#"{"error":"Text is required"}"#, "body: {body}");
    }

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn form_analyze_rejects_empty_text() {
    let (app, store) = setup().await;

    for body in ["text=", "text=+++", "text=%20%0A", ""] {
        let (status, resp) = send(&app, form_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert_eq!(resp, r#"{"error":"Empty text"}"#);
    }

    let bare = Request::builder()
        .method("POST")
        .uri("/analyze")
        .body(Body::empty())
        .unwrap();
    let plain = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("text="))
        .unwrap();
    for req in [bare, plain] {
        let (status, resp) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, r#"{"error":"Empty text"}"#);
    }

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn form_analyze_stores_text_verbatim() {
    let (app, store) = setup().await;

    let (status, _) = send(&app, form_request("text=+%20padded%09text%0A")).await;
    assert_eq!(status, StatusCode::OK);

    let records = store.recent(1).await.unwrap();
    assert_eq!(records[0].text, "  padded\ttext\n");
}

#[tokio::test]
async fn form_analyze_renders_result_and_history() {
    let (app, store) = setup().await;

    send(&app, api_request(r#"{"text": "first review"}"#)).await;
    let (status, html) = send(&app, form_request("text=I+hate+waiting")).await;
    assert_eq!(status, StatusCode::OK);

    assert!(html.contains("<h2>Sentiment: NEGATIVE (99.12%)</h2>"));
    let newest = html.find("<b>I hate waiting</b>").unwrap();
    let oldest = html.find("<b>first review</b>").unwrap();
    assert!(newest < oldest);
    assert!(html.contains("<b>first review</b> \u{2192} POSITIVE (99.87%)"));

    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn home_shows_ten_most_recent_newest_first() {
    let (app, _store) = setup().await;

    for i in 0..15 {
        let body = serde_json::json!({ "text": format!("review {i}") }).to_string();
        let (status, _) = send(&app, api_request(&body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, html) = send(&app, home_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("<h2>"));
    assert_eq!(html.matches("<li>").count(), 10);

    let positions: Vec<usize> = (5..15)
        .rev()
        .map(|i| html.find(&format!("<b>review {i}</b>")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    for i in 0..5 {
        assert!(!html.contains(&format!("<b>review {i}</b>")));
    }
}

#[tokio::test]
async fn home_is_stable_without_writes() {
    let (app, _store) = setup().await;
    send(&app, api_request(r#"{"text": "steady"}"#)).await;

    let (_, first) = send(&app, home_request()).await;
    let (_, second) = send(&app, home_request()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn classifier_failure_is_server_error_and_stores_nothing() {
    let (app, store) = setup_with(Arc::new(UnavailableClassifier)).await;

    let (status, body) = send(&app, api_request(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);

    let (status, _) = send(&app, form_request("text=hello")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn history_api_caps_limit() {
    let (app, _store) = setup().await;
    for i in 0..3 {
        send(&app, api_request(&format!(r#"{{"text": "entry {i}"}}"#))).await;
    }

    let req = Request::builder()
        .uri("/api/history?limit=2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "entry 2");
    assert_eq!(records[0]["result"]["label"], "POSITIVE");
}

#[tokio::test]
async fn health_and_security_headers() {
    let (app, _store) = setup().await;

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], br#"{"status":"healthy"}"#);
}
