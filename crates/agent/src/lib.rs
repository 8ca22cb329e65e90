//! Question answering over the order dataset
//!
//! One question is handled as a single synchronous cycle:
//!
//! ```text
//! question ─┬─ identifier extraction ─┐
//!           └─ keyword extraction ─── intent ── row filter ── field resolution ── answer
//! ```
//!
//! [`QueryEngine`] borrows the session's dataset and tagger; it keeps no state
//! between questions.

pub mod answer;
pub mod engine;
pub mod lookup;
pub mod resolver;

pub use answer::{synthesize, ErrorKind, Finding};
pub use engine::{QueryEngine, QueryOutcome};
pub use lookup::{filter_records, filter_rows, matches_identifier};
pub use resolver::{resolve, Field, Resolution};
