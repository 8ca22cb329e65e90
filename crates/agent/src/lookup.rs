//! Row filter
//!
//! Selects the rows of one sales order. The identifier column is compared as
//! text, so numeric and string identifiers behave the same, and a row matches
//! when its identifier contains the extracted digits.

use order_desk_config::constants::columns;
use order_desk_core::{Dataset, RecordRef};
use order_desk_text_processing::SalesOrderId;

/// True if the row's identifier contains `id` (case-insensitive)
pub fn matches_identifier(record: &RecordRef<'_>, id: &SalesOrderId) -> bool {
    match record.get(columns::SO_NUMBER) {
        Some(value) if !value.is_missing() => value
            .to_string()
            .to_lowercase()
            .contains(&id.as_str().to_lowercase()),
        _ => false,
    }
}

/// Matching rows of a dataset, in dataset order
pub fn filter_rows<'a>(dataset: &'a Dataset, id: &SalesOrderId) -> Vec<RecordRef<'a>> {
    filter_records(dataset.rows(), id)
}

/// Matching rows of an arbitrary row sequence, order preserved
pub fn filter_records<'a>(
    rows: impl IntoIterator<Item = RecordRef<'a>>,
    id: &SalesOrderId,
) -> Vec<RecordRef<'a>> {
    rows.into_iter()
        .filter(|row| matches_identifier(row, id))
        .collect()
}
