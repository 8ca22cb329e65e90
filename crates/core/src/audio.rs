//! Audio payloads exchanged with speech collaborators

use serde::{Deserialize, Serialize};

/// An encoded audio recording (e.g. wav, webm, mp3)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Encoded bytes
    pub data: Vec<u8>,
    /// Container/codec name, lower-case
    pub format: String,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            data,
            format: format.into().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// MIME type for HTTP responses
    pub fn mime_type(&self) -> &'static str {
        match self.format.as_str() {
            "mp3" | "mpeg" => "audio/mpeg",
            "wav" | "wave" => "audio/wav",
            "webm" => "audio/webm",
            "ogg" | "opus" => "audio/ogg",
            _ => "application/octet-stream",
        }
    }
}
