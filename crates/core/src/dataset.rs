//! In-memory order dataset
//!
//! The dataset is loaded once per session by a [`DatasetProvider`](crate::DatasetProvider)
//! and then only ever borrowed. Rows keep their load order; every lookup result is
//! expressed in that order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

/// Tokens treated as an absent value when inferring cells from raw text
const MISSING_MARKERS: &[&str] = &["null", "nan", "none", "nat"];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A single cell of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a value from raw text without losing how it was written.
    ///
    /// Only plain digit runs that fit an `i64` become integers, and only ISO
    /// calendar dates become dates; both print back exactly as read. Anything
    /// else (decimals, exponents, padded or oversized numbers, timestamps) stays
    /// text, and dates inside text are still readable through [`CellValue::as_date`].
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m)) {
            return CellValue::Missing;
        }

        if is_plain_integer(s) {
            if let Ok(i) = s.parse::<i64>() {
                return CellValue::Integer(i);
            }
        }

        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if d.format("%Y-%m-%d").to_string() == s {
                return CellValue::Date(d);
            }
        }

        CellValue::Text(s.to_string())
    }

    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Calendar date of this value, if it holds or spells one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(s) => {
                let s = s.trim();
                DATE_LAYOUTS
                    .iter()
                    .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
                    .or_else(|| {
                        DATETIME_LAYOUTS
                            .iter()
                            .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
                            .map(|dt| dt.date())
                    })
            }
            _ => None,
        }
    }
}

/// Optional minus sign, then digits with no padding zero
fn is_plain_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{:.0}", v)
            }
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// Tabular order data with named columns
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::Dataset(format!("duplicate column '{}'", name)));
            }
        }
        Ok(Self {
            columns,
            index,
            rows: Vec::new(),
        })
    }

    /// Create a dataset and fill it with rows
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<CellValue>>,
    ) -> Result<Self> {
        let mut dataset = Self::new(columns)?;
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Append a row; its length must match the column count
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::Dataset(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<RecordRef<'_>> {
        (index < self.rows.len()).then_some(RecordRef {
            dataset: self,
            index,
        })
    }

    /// All rows in load order
    pub fn rows(&self) -> impl Iterator<Item = RecordRef<'_>> + '_ {
        (0..self.rows.len()).map(move |index| RecordRef {
            dataset: self,
            index,
        })
    }

    /// First `n` rows, for previews
    pub fn head(&self, n: usize) -> impl Iterator<Item = RecordRef<'_>> + '_ {
        self.rows().take(n)
    }
}

/// Borrowed view of one dataset row
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> RecordRef<'a> {
    /// Position of the row in the dataset
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of a named column; `None` when the column does not exist
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let col = self.dataset.column_index(column)?;
        self.dataset.rows[self.index].get(col)
    }

    pub fn values(&self) -> &'a [CellValue] {
        &self.dataset.rows[self.index]
    }
}

impl PartialEq for RecordRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.index == other.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            ["soNumber", "dealerName"],
            vec![
                vec![CellValue::Integer(123456), "Acme Motors".into()],
                vec![CellValue::Integer(654321), CellValue::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_infer_types() {
        assert_eq!(CellValue::infer("123456"), CellValue::Integer(123456));
        assert_eq!(CellValue::infer("-42"), CellValue::Integer(-42));
        assert_eq!(CellValue::infer(""), CellValue::Missing);
        assert_eq!(CellValue::infer("NaN"), CellValue::Missing);
        assert_eq!(CellValue::infer("NULL"), CellValue::Missing);
        assert_eq!(
            CellValue::infer("2024-03-01"),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(CellValue::infer("PN-99"), CellValue::Text("PN-99".into()));
    }

    #[test]
    fn test_leading_zero_stays_text() {
        assert_eq!(CellValue::infer("007123"), CellValue::Text("007123".into()));
        assert_eq!(CellValue::infer("0"), CellValue::Integer(0));
    }

    #[test]
    fn test_number_like_text_keeps_its_spelling() {
        for raw in ["5E3", "1.50", "0.5", "12.5", "+7", "1,000"] {
            let value = CellValue::infer(raw);
            assert_eq!(value, CellValue::Text(raw.into()));
            assert_eq!(value.to_string(), raw);
        }
    }

    #[test]
    fn test_oversized_identifier_stays_text() {
        let raw = "12345678901234567891";
        let value = CellValue::infer(raw);
        assert_eq!(value, CellValue::Text(raw.into()));
        assert_eq!(value.to_string(), raw);
    }

    #[test]
    fn test_timestamps_stay_text_but_read_as_dates() {
        let value = CellValue::infer("2024-03-01 10:30:00");
        assert_eq!(value, CellValue::Text("2024-03-01 10:30:00".into()));
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2024, 3, 1));

        // unpadded dates would print differently, so they are not converted
        assert_eq!(CellValue::infer("2024-3-1"), CellValue::Text("2024-3-1".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Float(123456.0).to_string(), "123456");
        assert_eq!(CellValue::Float(1.25).to_string(), "1.25");
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-01-09");
        let dt = date.and_hms_opt(8, 5, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2024-01-09 08:05:00");
    }

    #[test]
    fn test_missing_includes_nan() {
        assert!(CellValue::Missing.is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(!CellValue::Text(String::new()).is_missing());
    }

    #[test]
    fn test_as_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(CellValue::Date(date).as_date(), Some(date));
        assert_eq!(
            CellValue::DateTime(date.and_hms_opt(23, 0, 0).unwrap()).as_date(),
            Some(date)
        );
        assert_eq!(CellValue::from("31/12/2023").as_date(), Some(date));
        assert_eq!(CellValue::from("2023-12-31T05:00:00").as_date(), Some(date));
        assert_eq!(CellValue::from("soon").as_date(), None);
        assert_eq!(CellValue::Integer(20231231).as_date(), None);
    }

    #[test]
    fn test_dataset_lookup() {
        let ds = sample();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column("dealerName"));
        assert!(!ds.has_column("deliveryDate"));

        let row = ds.row(0).unwrap();
        assert_eq!(row.get("dealerName"), Some(&CellValue::from("Acme Motors")));
        assert_eq!(row.get("deliveryDate"), None);
        assert!(ds.row(2).is_none());
    }

    #[test]
    fn test_rejects_bad_rows_and_duplicate_columns() {
        let mut ds = sample();
        assert!(ds.push_row(vec![CellValue::Missing]).is_err());
        assert!(Dataset::new(["a", "a"]).is_err());
    }

    #[test]
    fn test_head_preserves_order() {
        let ds = sample();
        let indices: Vec<usize> = ds.head(5).map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(ds.head(1).count(), 1);
    }
}
