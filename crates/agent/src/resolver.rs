//! Field resolution
//!
//! Maps an intent (and, for serial lookups, a component) to a dataset column and
//! collects that column's values across the matched rows.
//!
//! Missing delivery dates are skipped rather than failing the question; a date
//! that cannot be read is skipped with a warning. When nothing is left the
//! resolution is [`Resolution::Empty`].

use std::collections::HashSet;

use order_desk_config::constants::columns;
use order_desk_core::{Dataset, RecordRef};
use order_desk_text_processing::{Component, Intent};

/// The dataset field a question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Serial(Component),
    DeliveryDate,
    Dealer,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Serial(component) => component.column(),
            Field::DeliveryDate => columns::DELIVERY_DATE,
            Field::Dealer => columns::DEALER_NAME,
        }
    }
}

/// Outcome of resolving a field over the matched rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one value was found, in row order
    Values { field: Field, values: Vec<String> },
    /// The column exists but holds nothing usable for these rows
    Empty { field: Field },
    /// The expected column is absent from the dataset
    MissingColumn { column: &'static str },
    /// A serial number was asked for without naming a component
    MissingComponent,
    /// The question matched no known intent
    Clarify,
}

/// Resolve `intent` over `rows` (all taken from `dataset`)
pub fn resolve(
    intent: Intent,
    component: Option<Component>,
    rows: &[RecordRef<'_>],
    dataset: &Dataset,
) -> Resolution {
    let field = match intent {
        Intent::Unclear => return Resolution::Clarify,
        Intent::ComponentSerialLookup => match component {
            Some(component) => Field::Serial(component),
            None => return Resolution::MissingComponent,
        },
        Intent::DeliveryDateLookup => Field::DeliveryDate,
        Intent::DealerLookup => Field::Dealer,
    };

    let column = field.column();
    if !dataset.has_column(column) {
        return Resolution::MissingColumn { column };
    }

    let values = match field {
        Field::Serial(_) => present_values(rows, column),
        Field::DeliveryDate => delivery_dates(rows, column),
        Field::Dealer => distinct(present_values(rows, column)),
    };

    if values.is_empty() {
        Resolution::Empty { field }
    } else {
        Resolution::Values { field, values }
    }
}

/// Non-missing values of `column`, stringified, in row order
fn present_values(rows: &[RecordRef<'_>], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_missing())
        .map(|value| value.to_string())
        .collect()
}

/// ISO dates of `column`, skipping missing and unreadable values
fn delivery_dates(rows: &[RecordRef<'_>], column: &str) -> Vec<String> {
    let mut dates = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(value) = row.get(column) else {
            continue;
        };
        if value.is_missing() {
            tracing::debug!(row = row.index(), "Skipping missing delivery date");
            continue;
        }
        match value.as_date() {
            Some(date) => dates.push(date.format("%Y-%m-%d").to_string()),
            None => tracing::warn!(
                row = row.index(),
                value = %value,
                "Skipping unreadable delivery date"
            ),
        }
    }
    dates
}

/// First occurrence of each value, order kept
fn distinct(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
