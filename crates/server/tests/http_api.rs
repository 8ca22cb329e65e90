//! Integration tests for the HTTP API
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`;
//! speech collaborators are replaced by in-process fakes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Value};
use tower::ServiceExt;

use order_desk_config::Settings;
use order_desk_core::{AudioClip, CellValue, Dataset, Error, Result, SpeechToText, TextToSpeech};
use order_desk_server::{create_router, AppState};

/// Returns the audio bytes as text; silence (all zero bytes) yields nothing
struct EchoStt;

#[async_trait]
impl SpeechToText for EchoStt {
    async fn transcribe(&self, audio: &AudioClip) -> Result<Option<String>> {
        if audio.data.iter().all(|b| *b == 0) {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&audio.data).into_owned()))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

struct FakeTts {
    fail: bool,
}

#[async_trait]
impl TextToSpeech for FakeTts {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<AudioClip> {
        if self.fail {
            return Err(Error::Speech("voice unavailable".into()));
        }
        Ok(AudioClip::new(text.as_bytes().to_vec(), "wav"))
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

fn dataset() -> Dataset {
    Dataset::from_rows(
        ["soNumber", "dealerName", "deliveryDate", "Pump SN_AX"],
        vec![
            vec![
                CellValue::Integer(123456),
                "Northline Fire Equipment".into(),
                CellValue::infer("2024-03-15"),
                "PN-99".into(),
            ],
            vec![
                CellValue::Integer(123456),
                "Northline Fire Equipment".into(),
                CellValue::infer("2024-03-22"),
                CellValue::Missing,
            ],
            vec![
                CellValue::Integer(234567),
                "Harbor Apparatus".into(),
                CellValue::Missing,
                "PN-12".into(),
            ],
        ],
    )
    .unwrap()
}

fn app() -> Router {
    create_router(AppState::new(Settings::default(), dataset()))
}

fn speech_app(tts_fails: bool) -> Router {
    let mut settings = Settings::default();
    settings.speech.stt_enabled = true;
    settings.speech.tts_enabled = true;
    let state = AppState::new(settings, dataset())
        .with_stt(Arc::new(EchoStt))
        .with_tts(Arc::new(FakeTts { fail: tts_fails }));
    create_router(state)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_ask_pump_serial() {
    let (status, body) = post_json(
        app(),
        "/api/ask",
        json!({ "question": "What is the pump serial number for SO-123456?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Pump serial numbers for SO number 123456: PN-99");
    assert_eq!(body["identifier"], "123456");
    assert_eq!(body["intent"], "component_serial_lookup");
    assert_eq!(body["component"], "pump");
    assert_eq!(body["matched_rows"], 2);
    assert!(body["error_kind"].is_null());
    assert!(body.get("audio").is_none());
}

#[tokio::test]
async fn test_ask_without_identifier() {
    let (status, body) = post_json(app(), "/api/ask", json!({ "question": "hello there" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error_kind"], "invalid_identifier");
    assert!(body["identifier"].is_null());
    assert!(body["intent"].is_null());
    assert!(body["answer"]
        .as_str()
        .unwrap()
        .starts_with("The query does not contain a valid SO number."));
}

#[tokio::test]
async fn test_ask_dealer_distinct() {
    let (_, body) = post_json(app(), "/api/ask", json!({ "question": "dealer for 123456" })).await;
    assert_eq!(body["answer"], "Dealer(s) for SO number 123456: Northline Fire Equipment");
}

#[tokio::test]
async fn test_ask_schema_error() {
    let ds = Dataset::from_rows(
        ["soNumber", "dealerName"],
        vec![vec![CellValue::Integer(123456), "Acme".into()]],
    )
    .unwrap();
    let app = create_router(AppState::new(Settings::default(), ds));

    let (status, body) = post_json(app, "/api/ask", json!({ "question": "delivery date for 123456" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Column 'deliveryDate' not found in the dataset.");
    assert_eq!(body["error_kind"], "missing_column");
}

#[tokio::test]
async fn test_ask_rejects_missing_question() {
    let (status, _) = post_json(app(), "/api/ask", json!({})).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_ask_returns_spoken_answer() {
    let (status, body) = post_json(
        speech_app(false),
        "/api/ask",
        json!({ "question": "delivery date for 123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected = "Delivery dates for SO number 123456: 2024-03-15, 2024-03-22";
    assert_eq!(body["answer"], expected);
    assert_eq!(body["audio_format"], "wav");
    let audio = BASE64.decode(body["audio"].as_str().unwrap()).unwrap();
    assert_eq!(audio, expected.as_bytes());
}

#[tokio::test]
async fn test_tts_failure_keeps_text_answer() {
    let (status, body) = post_json(
        speech_app(true),
        "/api/ask",
        json!({ "question": "dealer for 234567" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Dealer(s) for SO number 234567: Harbor Apparatus");
    assert!(body.get("audio").is_none());
}

#[tokio::test]
async fn test_voice_question() {
    let audio = BASE64.encode("pump serial for 234567");
    let (status, body) = post_json(
        speech_app(false),
        "/api/ask/voice",
        json!({ "audio": audio, "audio_format": "webm" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transcript"], "pump serial for 234567");
    assert_eq!(body["answer"], "Pump serial numbers for SO number 234567: PN-12");
}

#[tokio::test]
async fn test_voice_unintelligible() {
    let audio = BASE64.encode([0u8; 16]);
    let (status, body) = post_json(
        speech_app(false),
        "/api/ask/voice",
        json!({ "audio": audio, "audio_format": "wav" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Could not understand your speech");
}

#[tokio::test]
async fn test_voice_invalid_base64() {
    let (status, body) = post_json(
        speech_app(false),
        "/api/ask/voice",
        json!({ "audio": "***", "audio_format": "wav" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid base64 audio"));
}

#[tokio::test]
async fn test_voice_disabled() {
    let audio = BASE64.encode("dealer for 123456");
    let (status, _) = post_json(app(), "/api/ask/voice", json!({ "audio": audio })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_dataset_preview() {
    let (status, body) = get(app(), "/api/dataset/preview?rows=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_rows"], 3);
    assert_eq!(
        body["columns"],
        json!(["soNumber", "dealerName", "deliveryDate", "Pump SN_AX"])
    );
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], 123456);
    assert_eq!(rows[0][3], "PN-99");
}

#[tokio::test]
async fn test_dataset_preview_default_size() {
    let (_, body) = get(app(), "/api/dataset/preview").await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["dataset"]["rows"], 3);
    assert_eq!(body["checks"]["tagger"]["name"], "rule-based");
    assert_eq!(body["checks"]["stt"]["status"], "disabled");

    let (status, body) = get(app(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_empty_dataset_not_ready() {
    let app = create_router(AppState::new(
        Settings::default(),
        Dataset::new(["soNumber"]).unwrap(),
    ));
    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_health_degraded_without_identifier_column() {
    let app = create_router(AppState::new(
        Settings::default(),
        Dataset::new(["dealerName"]).unwrap(),
    ));
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
