//! HTTP Endpoints
//!
//! REST API for the order desk.

use std::time::{Duration, Instant};

use axum::{
    extract::{Json, Query, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use order_desk_agent::QueryOutcome;
use order_desk_config::constants::{columns, MAX_PREVIEW_ROWS};
use order_desk_core::CellValue;
use order_desk_text_processing::{Component, Intent};

use crate::metrics::{metrics_handler, record_query};
use crate::speech;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        // Questions
        .route("/api/ask", post(ask))
        .route("/api/ask/voice", post(speech::ask_voice))
        // Dataset
        .route("/api/dataset/preview", get(dataset_preview))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty or all invalid, defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Request body for POST /api/ask
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Answer plus what the engine understood
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub identifier: Option<String>,
    pub intent: Option<Intent>,
    pub component: Option<Component>,
    pub matched_rows: usize,
    pub error_kind: Option<&'static str>,
    /// Question as transcribed, for voice requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Base64 encoded spoken answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
}

impl From<&QueryOutcome> for AskResponse {
    fn from(outcome: &QueryOutcome) -> Self {
        Self {
            answer: outcome.answer.clone(),
            identifier: outcome.identifier().map(|id| id.to_string()),
            intent: outcome.intent,
            component: outcome.component,
            matched_rows: outcome.matched_rows,
            error_kind: outcome.error_kind().map(|k| k.as_str()),
            transcript: None,
            audio: None,
            audio_format: None,
        }
    }
}

/// Run one question through the engine and, when enabled, speak the answer.
///
/// Speech synthesis failures are logged; the text answer is always returned.
pub(crate) async fn answer_question(state: &AppState, question: &str) -> AskResponse {
    let start = Instant::now();
    let outcome = state.engine().answer(question);
    record_query(outcome.intent, outcome.outcome_label(), start.elapsed());

    let mut response = AskResponse::from(&outcome);

    if let Some(tts) = state.text_to_speech() {
        match tts
            .synthesize(&outcome.answer, &state.config.speech.language)
            .await
        {
            Ok(clip) if !clip.is_empty() => {
                response.audio = Some(BASE64.encode(&clip.data));
                response.audio_format = Some(clip.format);
            }
            Ok(_) => tracing::debug!(model = tts.model_name(), "TTS returned no audio"),
            Err(e) => tracing::warn!(
                model = tts.model_name(),
                error = %e,
                "TTS failed, returning text answer only"
            ),
        }
    }

    response
}

/// POST /api/ask
async fn ask(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Json<AskResponse> {
    tracing::info!(question_len = request.question.len(), "Question received");
    Json(answer_question(&state, &request.question).await)
}

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub rows: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse<'a> {
    pub columns: &'a [String],
    pub total_rows: usize,
    pub rows: Vec<&'a [CellValue]>,
}

/// GET /api/dataset/preview?rows=n
async fn dataset_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let n = params
        .rows
        .unwrap_or(state.config.dataset.preview_rows)
        .min(MAX_PREVIEW_ROWS);

    let dataset = state.dataset.as_ref();
    let preview = PreviewResponse {
        columns: dataset.columns(),
        total_rows: dataset.len(),
        rows: dataset.head(n).map(|row| row.values()).collect(),
    };

    match serde_json::to_value(&preview) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize dataset preview");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "failed to serialize preview" })),
            )
        }
    }
}

/// Health check: the dataset is loaded and carries the identifier column
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let dataset = state.dataset.as_ref();
    let mut checks = serde_json::Map::new();

    let identifier_ok = dataset.has_column(columns::SO_NUMBER);
    checks.insert(
        "dataset".to_string(),
        serde_json::json!({
            "status": if identifier_ok { "ok" } else { "missing_identifier_column" },
            "rows": dataset.len(),
            "columns": dataset.columns().len(),
        }),
    );
    checks.insert(
        "tagger".to_string(),
        serde_json::json!({ "status": "ok", "name": state.tagger.name() }),
    );
    checks.insert(
        "stt".to_string(),
        match state.speech_to_text() {
            Some(stt) => serde_json::json!({ "status": "ok", "model": stt.model_name() }),
            None => serde_json::json!({ "status": "disabled" }),
        },
    );
    checks.insert(
        "tts".to_string(),
        match state.text_to_speech() {
            Some(tts) => serde_json::json!({ "status": "ok", "model": tts.model_name() }),
            None => serde_json::json!({ "status": "disabled" }),
        },
    );

    let (status, status_code) = if identifier_ok {
        ("healthy", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks
        })),
    )
}

/// Readiness: there is at least one row to answer from
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let rows = state.dataset.len();
    let ready = rows > 0;

    (
        if ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "rows": rows
        })),
    )
}
