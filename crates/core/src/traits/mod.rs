//! Collaborator traits
//!
//! The query core depends only on these contracts:
//! - [`PosTagger`] - tokenization and part-of-speech tagging
//! - [`DatasetProvider`] - one-shot loading of the order table
//! - [`SpeechToText`] / [`TextToSpeech`] - optional voice front end

mod dataset;
mod speech;
mod tagger;

pub use dataset::DatasetProvider;
pub use speech::{SpeechToText, TextToSpeech};
pub use tagger::{PartOfSpeech, PosTagger, TaggedToken};
