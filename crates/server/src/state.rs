//! Application State
//!
//! Shared state across all handlers. The dataset is loaded once at startup and
//! never mutated, so handlers only ever take shared references to it.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use order_desk_agent::QueryEngine;
use order_desk_config::Settings;
use order_desk_core::{Dataset, PosTagger, SpeechToText, TextToSpeech};
use order_desk_text_processing::RuleBasedTagger;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub dataset: Arc<Dataset>,
    pub tagger: Arc<dyn PosTagger>,
    pub stt: Option<Arc<dyn SpeechToText>>,
    pub tts: Option<Arc<dyn TextToSpeech>>,
    /// Set when this process installed the Prometheus recorder
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with the bundled rule-based tagger and no speech collaborators
    pub fn new(config: Settings, dataset: Dataset) -> Self {
        Self {
            config: Arc::new(config),
            dataset: Arc::new(dataset),
            tagger: Arc::new(RuleBasedTagger::new()),
            stt: None,
            tts: None,
            metrics: None,
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_stt(mut self, stt: Arc<dyn SpeechToText>) -> Self {
        self.stt = Some(stt);
        self
    }

    pub fn with_tts(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.tts = Some(tts);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Engine for one request; borrows the shared dataset and tagger
    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.dataset, self.tagger.as_ref())
    }

    /// Speech-to-text collaborator, if enabled and attached
    pub fn speech_to_text(&self) -> Option<&Arc<dyn SpeechToText>> {
        self.stt.as_ref().filter(|_| self.config.speech.stt_enabled)
    }

    /// Text-to-speech collaborator, if enabled and attached
    pub fn text_to_speech(&self) -> Option<&Arc<dyn TextToSpeech>> {
        self.tts.as_ref().filter(|_| self.config.speech.tts_enabled)
    }
}
