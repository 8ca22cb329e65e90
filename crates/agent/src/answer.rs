//! Answer synthesis
//!
//! Every way a question can end maps to exactly one fixed response template.

use order_desk_text_processing::SalesOrderId;

use crate::resolver::{Field, Resolution};

const INVALID_IDENTIFIER: &str = "The query does not contain a valid SO number. \
     Please try again with a valid format (e.g., 'SO-123456' or '123456').";

const UNCLEAR: &str =
    "Query unclear. Please ask about serial numbers, dealers, or delivery dates.";

const MISSING_COMPONENT: &str =
    "Component not found in the query. Please specify pump, tank, body, or chassis.";

/// Where a question ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// No sales-order number in the question; nothing else was attempted
    InvalidIdentifier,
    /// Well-formed identifier with no rows in the dataset
    NoMatchingRows { id: SalesOrderId },
    /// Rows matched and the requested field was resolved
    Resolved { id: SalesOrderId, resolution: Resolution },
}

/// Error paths a question can take; all of them still produce an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIdentifier,
    NoMatchingRows,
    AmbiguousIntent,
    /// Schema drift: an expected column is not in the dataset
    MissingColumn,
    MissingComponentSelector,
    EmptyValueSet,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::NoMatchingRows => "no_matching_rows",
            ErrorKind::AmbiguousIntent => "ambiguous_intent",
            ErrorKind::MissingColumn => "missing_column",
            ErrorKind::MissingComponentSelector => "missing_component_selector",
            ErrorKind::EmptyValueSet => "empty_value_set",
        }
    }

    /// Configuration/schema problem rather than absent data
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ErrorKind::MissingColumn)
    }
}

impl Finding {
    pub fn identifier(&self) -> Option<&SalesOrderId> {
        match self {
            Finding::InvalidIdentifier => None,
            Finding::NoMatchingRows { id } | Finding::Resolved { id, .. } => Some(id),
        }
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Finding::Resolved { resolution, .. } => Some(resolution),
            _ => None,
        }
    }

    /// `None` when the question was answered with values
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Finding::InvalidIdentifier => Some(ErrorKind::InvalidIdentifier),
            Finding::NoMatchingRows { .. } => Some(ErrorKind::NoMatchingRows),
            Finding::Resolved { resolution, .. } => match resolution {
                Resolution::Values { .. } => None,
                Resolution::Empty { .. } => Some(ErrorKind::EmptyValueSet),
                Resolution::MissingColumn { .. } => Some(ErrorKind::MissingColumn),
                Resolution::MissingComponent => Some(ErrorKind::MissingComponentSelector),
                Resolution::Clarify => Some(ErrorKind::AmbiguousIntent),
            },
        }
    }
}

/// Build the response text for a finding
pub fn synthesize(finding: &Finding) -> String {
    match finding {
        Finding::InvalidIdentifier => INVALID_IDENTIFIER.to_string(),
        Finding::NoMatchingRows { id } => format!("No information found for SO number {}.", id),
        Finding::Resolved { id, resolution } => match resolution {
            Resolution::Clarify => UNCLEAR.to_string(),
            Resolution::MissingComponent => MISSING_COMPONENT.to_string(),
            Resolution::MissingColumn { column } => {
                format!("Column '{}' not found in the dataset.", column)
            }
            Resolution::Values { field, values } => {
                let joined = values.join(", ");
                match field {
                    Field::Serial(component) => format!(
                        "{} serial numbers for SO number {}: {}",
                        component.title(),
                        id,
                        joined
                    ),
                    Field::DeliveryDate => {
                        format!("Delivery dates for SO number {}: {}", id, joined)
                    }
                    Field::Dealer => format!("Dealer(s) for SO number {}: {}", id, joined),
                }
            }
            Resolution::Empty { field } => match field {
                Field::Serial(component) => format!(
                    "No {} serial numbers found for SO number {}.",
                    component.name(),
                    id
                ),
                Field::DeliveryDate => format!("No delivery dates found for SO number {}.", id),
                Field::Dealer => format!("No dealer information found for SO number {}.", id),
            },
        },
    }
}
