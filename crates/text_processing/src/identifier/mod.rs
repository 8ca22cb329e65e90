//! Sales-order identifier extraction
//!
//! Finds the first `SO`-style order number in free text. Only digit runs of six or
//! more are accepted so quantities ("2 pumps", "12 units") never look like orders.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use order_desk_config::constants::SO_NUMBER_PATTERN;

static SO_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(SO_NUMBER_PATTERN).unwrap());

/// Digits of a sales-order number, without any `SO` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesOrderId(String);

impl SalesOrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SalesOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pattern-based identifier extractor
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    regex: Regex,
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierExtractor {
    /// Extractor using the standard `SO` number pattern
    pub fn new() -> Self {
        Self {
            regex: SO_NUMBER_REGEX.clone(),
        }
    }

    /// Extractor with a custom pattern; capture group 1 must hold the identifier
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        if regex.captures_len() < 2 {
            tracing::warn!(pattern, "identifier pattern has no capture group, using whole match");
        }
        Ok(Self { regex })
    }

    /// First identifier in `text`, if any
    pub fn extract(&self, text: &str) -> Option<SalesOrderId> {
        let caps = self.regex.captures(text)?;
        let m = caps.get(1).or_else(|| caps.get(0))?;
        Some(SalesOrderId(m.as_str().to_string()))
    }
}
