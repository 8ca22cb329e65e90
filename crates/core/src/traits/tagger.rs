//! Part-of-speech tagging interface

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech categories (Universal Dependencies style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Num,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Cconj,
    Sconj,
    Part,
    Intj,
    Punct,
    Sym,
    X,
}

impl PartOfSpeech {
    /// Nouns, proper nouns and numerals carry the content of an order question
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn | Self::Num)
    }
}

/// A token with its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// Tokenizer + tagger
///
/// Given lower-cased text, returns the tokens in order with their tags.
/// Implementations must be cheap to call repeatedly; they are constructed once
/// at startup and shared by every query.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Tagger name for logging
    fn name(&self) -> &str;
}
