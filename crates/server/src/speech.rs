//! Voice questions
//!
//! Flow:
//! 1. Receive a recording (base64 encoded, any container the STT accepts)
//! 2. Transcribe through the attached `SpeechToText`
//! 3. Answer the transcript exactly as a typed question

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;

use order_desk_core::AudioClip;

use crate::http::{answer_question, AskResponse};
use crate::state::AppState;
use crate::ServerError;

/// Request for POST /api/ask/voice
#[derive(Debug, Deserialize)]
pub struct VoiceAskRequest {
    /// Base64 encoded audio data
    pub audio: String,
    /// Audio format (wav, webm, ...)
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

fn default_audio_format() -> String {
    "wav".to_string()
}

/// POST /api/ask/voice
pub async fn ask_voice(
    State(state): State<AppState>,
    Json(request): Json<VoiceAskRequest>,
) -> Result<Json<AskResponse>, ServerError> {
    let stt = state
        .speech_to_text()
        .cloned()
        .ok_or_else(|| ServerError::Unavailable("speech recognition is not enabled".into()))?;

    let data = BASE64
        .decode(request.audio.trim())
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid base64 audio: {}", e)))?;
    let clip = AudioClip::new(data, request.audio_format);
    if clip.is_empty() {
        return Err(ServerError::InvalidRequest("empty audio".into()));
    }

    tracing::info!(
        model = stt.model_name(),
        audio_format = %clip.format,
        audio_bytes = clip.data.len(),
        "Voice question received"
    );

    let transcript = stt
        .transcribe(&clip)
        .await
        .map_err(|e| ServerError::Speech(e.to_string()))?
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(ServerError::Unintelligible)?;

    tracing::debug!(transcript = %transcript, "Transcribed voice question");

    let mut response = answer_question(&state, &transcript).await;
    response.transcript = Some(transcript);
    Ok(Json(response))
}
