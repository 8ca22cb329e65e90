//! Query engine
//!
//! Runs one question through the full cycle and always returns an answer.
//! Every failure path ends in a [`Finding`] with its own fixed response.

use std::time::Instant;

use order_desk_config::constants::columns;
use order_desk_core::{Dataset, PosTagger};
use order_desk_text_processing::{
    Component, IdentifierExtractor, Intent, IntentClassifier, KeywordExtractor, KeywordSet,
    SalesOrderId,
};

use crate::answer::{synthesize, ErrorKind, Finding};
use crate::lookup::filter_rows;
use crate::resolver::{resolve, Resolution};

/// Everything learned while answering one question
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub question: String,
    /// `None` when the question had no identifier
    pub keywords: Option<KeywordSet>,
    pub intent: Option<Intent>,
    pub component: Option<Component>,
    pub matched_rows: usize,
    pub finding: Finding,
    pub answer: String,
}

impl QueryOutcome {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.finding.error_kind()
    }

    pub fn identifier(&self) -> Option<&SalesOrderId> {
        self.finding.identifier()
    }

    /// Label for metrics: `answered` or the error kind
    pub fn outcome_label(&self) -> &'static str {
        self.error_kind().map(|k| k.as_str()).unwrap_or("answered")
    }
}

/// Answers questions against a borrowed dataset
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
    tagger: &'a dyn PosTagger,
    identifiers: IdentifierExtractor,
    classifier: IntentClassifier,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset, tagger: &'a dyn PosTagger) -> Self {
        Self {
            dataset,
            tagger,
            identifiers: IdentifierExtractor::new(),
            classifier: IntentClassifier::new(),
        }
    }

    /// Use a different identifier pattern
    pub fn with_identifier_extractor(mut self, identifiers: IdentifierExtractor) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Answer one question
    pub fn answer(&self, question: &str) -> QueryOutcome {
        let start = Instant::now();

        let Some(id) = self.identifiers.extract(question) else {
            tracing::info!("No sales-order identifier in question");
            return self.finish(question, None, None, None, 0, Finding::InvalidIdentifier);
        };

        let keywords = KeywordExtractor::new(self.tagger).extract(question);
        let intent = self.classifier.classify(&keywords);
        let component = match intent {
            Intent::ComponentSerialLookup => Component::select(question),
            _ => None,
        };

        if !self.dataset.has_column(columns::SO_NUMBER) {
            let finding = Finding::Resolved {
                id,
                resolution: Resolution::MissingColumn {
                    column: columns::SO_NUMBER,
                },
            };
            return self.finish(question, Some(keywords), Some(intent), component, 0, finding);
        }

        let rows = filter_rows(self.dataset, &id);
        tracing::debug!(
            identifier = %id,
            intent = %intent,
            matched_rows = rows.len(),
            "Filtered rows"
        );

        let matched_rows = rows.len();
        let finding = if rows.is_empty() {
            Finding::NoMatchingRows { id }
        } else {
            let resolution = resolve(intent, component, &rows, self.dataset);
            Finding::Resolved { id, resolution }
        };

        let outcome = self.finish(
            question,
            Some(keywords),
            Some(intent),
            component,
            matched_rows,
            finding,
        );
        tracing::debug!(
            latency_us = start.elapsed().as_micros() as u64,
            "Question answered"
        );
        outcome
    }

    fn finish(
        &self,
        question: &str,
        keywords: Option<KeywordSet>,
        intent: Option<Intent>,
        component: Option<Component>,
        matched_rows: usize,
        finding: Finding,
    ) -> QueryOutcome {
        let answer = synthesize(&finding);

        match finding.error_kind() {
            Some(kind) if kind.is_schema_error() => tracing::warn!(
                error_kind = kind.as_str(),
                schema_error = true,
                answer = %answer,
                "Dataset is missing an expected column"
            ),
            Some(kind) => tracing::info!(
                error_kind = kind.as_str(),
                identifier = finding.identifier().map(|id| id.as_str()),
                "Question not answered with values"
            ),
            None => tracing::info!(
                identifier = finding.identifier().map(|id| id.as_str()),
                intent = intent.map(|i| i.as_str()),
                matched_rows,
                "Question answered"
            ),
        }

        QueryOutcome {
            question: question.to_string(),
            keywords,
            intent,
            component,
            matched_rows,
            finding,
            answer,
        }
    }
}
