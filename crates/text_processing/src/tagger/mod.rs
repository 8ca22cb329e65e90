//! Lexicon-based part-of-speech tagger
//!
//! A small, deterministic tagger for short English questions about orders.
//! Closed-class words (determiners, pronouns, prepositions, auxiliaries, ...)
//! come from fixed lexicons; digits and number words are numerals; a short list
//! of verbs, adjectives and adverbs covers what users actually type. Any other
//! word is tagged as a noun, since unknown words in English queries are usually
//! nouns.
//!
//! Words that start with an upper-case letter after the first token are tagged as
//! proper nouns. The keyword extractor lower-cases questions first, so this only
//! matters for callers tagging raw text.

use unicode_segmentation::UnicodeSegmentation;

use order_desk_core::{PartOfSpeech, PosTagger, TaggedToken};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "all",
    "both", "either", "neither", "no", "another", "which", "whose", "whatever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "she", "her", "hers", "it", "its", "itself", "we", "us", "our", "ours", "they", "them",
    "their", "theirs", "what", "who", "whom", "something", "anything", "nothing", "everything",
    "someone", "anyone",
];

const ADPOSITIONS: &[&str] = &[
    "of", "for", "in", "on", "at", "by", "with", "from", "to", "about", "into", "onto", "over",
    "under", "after", "before", "between", "through", "during", "against", "without", "within",
    "across", "per", "via", "regarding", "towards", "toward", "upon",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "has", "have",
    "had", "can", "could", "will", "would", "shall", "should", "may", "might", "must", "'s", "'re",
    "'m", "'ll", "'d", "'ve",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &["if", "because", "while", "although", "though", "whether", "since", "unless"];

const PARTICLES: &[&str] = &["not", "n't", "'", "up", "off", "out"];

const INTERJECTIONS: &[&str] = &["hello", "hi", "hey", "please", "thanks", "thank", "ok", "okay", "yes", "no"];

const ADVERBS: &[&str] = &[
    "when", "where", "why", "how", "so", "also", "just", "only", "again", "still", "already",
    "soon", "now", "then", "there", "here", "very", "too", "currently", "exactly", "yet", "ever",
];

const VERBS: &[&str] = &[
    "give", "gave", "tell", "told", "show", "shown", "find", "found", "need", "want", "know",
    "get", "got", "check", "see", "let", "look", "list", "deliver", "delivered", "ship", "shipped",
    "sold", "sell", "buy", "bought", "order", "ordered", "send", "sent", "make", "made", "come",
    "go", "goes", "going", "expect", "expected", "arrive", "arrives", "arrived", "assign",
    "assigned", "fit", "fitted", "install", "installed", "handle", "handled", "confirm", "say",
    "fetch", "lookup", "mean",
];

const ADJECTIVES: &[&str] = &[
    "serial", "new", "old", "last", "next", "latest", "first", "current", "expected", "final",
    "same", "other", "different", "full", "exact", "scheduled", "planned", "due", "late", "early",
    "available", "correct", "right", "wrong",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "lakh", "crore",
];

/// Deterministic lexicon tagger
#[derive(Debug, Clone, Default)]
pub struct RuleBasedTagger;

impl RuleBasedTagger {
    pub fn new() -> Self {
        Self
    }

    fn classify(word: &str, position: usize) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().all(|c| c.is_ascii_punctuation() && !"$%+<=>^`|~#&*@".contains(c)) {
                PartOfSpeech::Punct
            } else {
                PartOfSpeech::Sym
            };
        }

        if is_numeral(word) {
            return PartOfSpeech::Num;
        }

        let lower = word.to_lowercase();
        let w = lower.as_str();

        if position > 0 && word.chars().next().is_some_and(char::is_uppercase) {
            return PartOfSpeech::Propn;
        }

        // Order matters: "that"/"which" are determiners before pronouns,
        // "no" is a determiner before an interjection, "so"/"yet" adverbs before conjunctions.
        if DETERMINERS.contains(&w) {
            PartOfSpeech::Det
        } else if PRONOUNS.contains(&w) {
            PartOfSpeech::Pron
        } else if AUXILIARIES.contains(&w) {
            PartOfSpeech::Aux
        } else if ADPOSITIONS.contains(&w) {
            PartOfSpeech::Adp
        } else if ADVERBS.contains(&w) {
            PartOfSpeech::Adv
        } else if COORDINATORS.contains(&w) {
            PartOfSpeech::Cconj
        } else if SUBORDINATORS.contains(&w) {
            PartOfSpeech::Sconj
        } else if PARTICLES.contains(&w) {
            PartOfSpeech::Part
        } else if INTERJECTIONS.contains(&w) {
            PartOfSpeech::Intj
        } else if VERBS.contains(&w) {
            PartOfSpeech::Verb
        } else if ADJECTIVES.contains(&w) {
            PartOfSpeech::Adj
        } else if w.len() > 4 && w.ends_with("ly") {
            PartOfSpeech::Adv
        } else {
            PartOfSpeech::Noun
        }
    }
}

/// Digit runs (with optional separators) and spelled-out numbers
fn is_numeral(word: &str) -> bool {
    let digits_only = word.chars().any(|c| c.is_numeric())
        && word.chars().all(|c| c.is_numeric() || c == '.' || c == ',');
    digits_only || NUMBER_WORDS.contains(&word.to_lowercase().as_str())
}

impl PosTagger for RuleBasedTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        text.split_word_bounds()
            .filter(|t| !t.trim().is_empty())
            .enumerate()
            .map(|(position, token)| TaggedToken::new(token, Self::classify(token, position)))
            .collect()
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, PartOfSpeech)> {
        RuleBasedTagger::new()
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.pos))
            .collect()
    }

    fn pos_of(text: &str, word: &str) -> PartOfSpeech {
        tags(text)
            .into_iter()
            .find(|(t, _)| t == word)
            .map(|(_, p)| p)
            .unwrap_or_else(|| panic!("token {word} not found in {text}"))
    }

    #[test]
    fn test_order_question() {
        let text = "what is the delivery date for so-123456?";
        assert_eq!(pos_of(text, "what"), PartOfSpeech::Pron);
        assert_eq!(pos_of(text, "is"), PartOfSpeech::Aux);
        assert_eq!(pos_of(text, "the"), PartOfSpeech::Det);
        assert_eq!(pos_of(text, "delivery"), PartOfSpeech::Noun);
        assert_eq!(pos_of(text, "date"), PartOfSpeech::Noun);
        assert_eq!(pos_of(text, "for"), PartOfSpeech::Adp);
        assert_eq!(pos_of(text, "123456"), PartOfSpeech::Num);
        assert_eq!(pos_of(text, "?"), PartOfSpeech::Punct);
    }

    #[test]
    fn test_hyphen_splits_prefix_from_digits() {
        let words: Vec<String> = tags("so-123456").into_iter().map(|(t, _)| t).collect();
        assert_eq!(words, vec!["so", "-", "123456"]);
    }

    #[test]
    fn test_whitespace_is_dropped() {
        let words: Vec<String> = tags("  dealer   name ").into_iter().map(|(t, _)| t).collect();
        assert_eq!(words, vec!["dealer", "name"]);
    }

    #[test]
    fn test_open_class_words() {
        assert_eq!(pos_of("show me the dealer", "show"), PartOfSpeech::Verb);
        assert_eq!(pos_of("show me the dealer", "dealer"), PartOfSpeech::Noun);
        assert_eq!(pos_of("the serial number", "serial"), PartOfSpeech::Adj);
        assert_eq!(pos_of("delivered quickly", "quickly"), PartOfSpeech::Adv);
        assert_eq!(pos_of("two tanks", "two"), PartOfSpeech::Num);
    }

    #[test]
    fn test_capitalized_words_are_proper_nouns() {
        assert_eq!(pos_of("dealer for Northline", "Northline"), PartOfSpeech::Propn);
        // sentence-initial capitals are not
        assert_eq!(pos_of("Show dealer", "Show"), PartOfSpeech::Verb);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(pos_of("cost $ 5", "$"), PartOfSpeech::Sym);
        assert_eq!(pos_of("done .", "."), PartOfSpeech::Punct);
    }
}
