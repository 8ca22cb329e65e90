//! Speech processing traits

use crate::{AudioClip, Result};
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// A transcription is treated exactly like typed text by the query core.
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(WhisperStt::new(config));
/// if let Some(text) = stt.transcribe(&clip).await? {
///     println!("Heard: {}", text);
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe a recording
    ///
    /// # Returns
    /// `Ok(None)` when nothing intelligible was heard
    async fn transcribe(&self, audio: &AudioClip) -> Result<Option<String>>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

/// Text-to-Speech interface
///
/// Answers are spoken as a side effect; callers never depend on success.
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize text to audio
    ///
    /// # Arguments
    /// * `text` - Text to synthesize
    /// * `language` - Language code, e.g. `en`
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioClip>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
