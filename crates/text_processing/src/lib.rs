//! Question interpretation for the order desk
//!
//! This crate turns a raw question into the pieces the lookup needs:
//! - **Identifier extraction**: the sales-order number (`SO-123456`, `123456`)
//! - **Tagging**: a lexicon-driven part-of-speech tagger
//! - **Keyword extraction**: nouns, numerals and the component vocabulary
//! - **Intent classification**: serial, delivery-date or dealer lookup
//!
//! # Example
//!
//! ```
//! use order_desk_text_processing::{
//!     Component, IdentifierExtractor, Intent, IntentClassifier, KeywordExtractor, RuleBasedTagger,
//! };
//!
//! let question = "What is the pump serial number for SO-123456?";
//! let tagger = RuleBasedTagger::new();
//!
//! let id = IdentifierExtractor::new().extract(question).unwrap();
//! assert_eq!(id.as_str(), "123456");
//!
//! let keywords = KeywordExtractor::new(&tagger).extract(question);
//! assert_eq!(IntentClassifier::new().classify(&keywords), Intent::ComponentSerialLookup);
//! assert_eq!(Component::select(question), Some(Component::Pump));
//! ```

pub mod identifier;
pub mod intent;
pub mod keywords;
pub mod tagger;

pub use identifier::{IdentifierExtractor, SalesOrderId};
pub use intent::{Component, Intent, IntentClassifier};
pub use keywords::{KeywordExtractor, KeywordSet};
pub use tagger::RuleBasedTagger;
