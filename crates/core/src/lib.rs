//! Core traits and types for the order desk
//!
//! This crate provides foundational types used across all other crates:
//! - The in-memory order dataset and its cell values
//! - Collaborator traits (POS tagger, dataset provider, speech-to-text, text-to-speech)
//! - Error types

pub mod audio;
pub mod dataset;
pub mod error;
pub mod traits;

pub use audio::AudioClip;
pub use dataset::{CellValue, Dataset, RecordRef};
pub use error::{Error, Result};

pub use traits::{
    // Data
    DatasetProvider,
    // Language
    PartOfSpeech,
    PosTagger,
    // Speech
    SpeechToText,
    TaggedToken,
    TextToSpeech,
};
