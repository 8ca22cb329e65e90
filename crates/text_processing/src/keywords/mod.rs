//! Keyword extraction
//!
//! Reduces a question to its content tokens: every noun, proper noun and numeral
//! reported by the tagger, plus the component vocabulary (`serial`, `pump`,
//! `tank`, `body`, `chassis`) whatever tag those words received.

use serde::Serialize;
use std::collections::BTreeSet;

use order_desk_config::constants::vocabulary::SERIAL_TERMS;
use order_desk_core::PosTagger;

/// Normalized tokens of one question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// True if any of `tokens` is present
    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.0.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Extracts keywords using a borrowed tagger
pub struct KeywordExtractor<'a> {
    tagger: &'a dyn PosTagger,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(tagger: &'a dyn PosTagger) -> Self {
        Self { tagger }
    }

    pub fn extract(&self, question: &str) -> KeywordSet {
        let lowered = question.to_lowercase();
        let keywords: KeywordSet = self
            .tagger
            .tag(&lowered)
            .into_iter()
            .filter(|token| {
                token.pos.is_content() || SERIAL_TERMS.contains(&token.text.to_lowercase().as_str())
            })
            .map(|token| token.text)
            .collect();

        tracing::trace!(
            tagger = self.tagger.name(),
            keywords = ?keywords,
            "Extracted keywords"
        );
        keywords
    }
}
