//! JSON export loader
//!
//! Expects an array of flat objects, e.g. the records of a stored-procedure
//! result set serialized as JSON. Columns appear in first-seen key order.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use order_desk_core::{CellValue, Dataset, DatasetProvider, Error, Result};

/// Loads a dataset from a JSON array of records
#[derive(Debug, Clone)]
pub struct JsonDatasetProvider {
    path: PathBuf,
}

impl JsonDatasetProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse records from a JSON string
    pub fn parse(&self, content: &str) -> Result<Dataset> {
        let value: Value = serde_json::from_str(content)?;
        let records = value
            .as_array()
            .ok_or_else(|| Error::Parse("expected a JSON array of records".to_string()))?;

        let mut objects: Vec<&Map<String, Value>> = Vec::with_capacity(records.len());
        let mut columns: Vec<String> = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let obj = record
                .as_object()
                .ok_or_else(|| Error::Parse(format!("record {} is not an object", idx)))?;
            for key in obj.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            objects.push(obj);
        }

        let mut dataset = Dataset::new(columns.clone())?;
        for obj in objects {
            let row = columns
                .iter()
                .map(|col| obj.get(col).map(to_cell).unwrap_or(CellValue::Missing))
                .collect();
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }
}

fn to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Number(n) if n.is_i64() => n.as_i64().map(CellValue::Integer).unwrap_or(CellValue::Missing),
        // beyond i64: keep the digits, an f64 would round them
        Value::Number(n) if n.is_u64() => CellValue::Text(n.to_string()),
        Value::Number(n) => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Missing),
        Value::String(s) => CellValue::infer(s),
        other => CellValue::Text(other.to_string()),
    }
}

impl DatasetProvider for JsonDatasetProvider {
    fn load(&self) -> Result<Dataset> {
        let content = std::fs::read_to_string(&self.path)?;
        let dataset = self.parse(&content)?;
        tracing::info!(
            path = %self.path.display(),
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Loaded JSON dataset"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let ds = JsonDatasetProvider::new("unused.json")
            .parse(
                r#"[
                    {"soNumber": 123456, "dealerName": "Acme", "deliveryDate": "2024-03-15T00:00:00"},
                    {"soNumber": "654321", "dealerName": null, "Pump SN_AX": "PN-7"}
                ]"#,
            )
            .unwrap();

        assert_eq!(ds.columns(), &["soNumber", "dealerName", "deliveryDate", "Pump SN_AX"]);
        let first = ds.row(0).unwrap();
        assert_eq!(first.get("soNumber"), Some(&CellValue::Integer(123456)));
        let delivery = first.get("deliveryDate").unwrap();
        assert_eq!(delivery.as_date(), chrono::NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(first.get("Pump SN_AX").unwrap().is_missing());

        let second = ds.row(1).unwrap();
        assert_eq!(second.get("soNumber"), Some(&CellValue::Integer(654321)));
        assert!(second.get("dealerName").unwrap().is_missing());
    }

    #[test]
    fn test_large_identifier_keeps_digits() {
        let ds = JsonDatasetProvider::new("unused.json")
            .parse(r#"[{"soNumber": 12345678901234567891}]"#)
            .unwrap();
        assert_eq!(
            ds.row(0).unwrap().get("soNumber"),
            Some(&CellValue::from("12345678901234567891"))
        );
    }

    #[test]
    fn test_rejects_non_array() {
        let err = JsonDatasetProvider::new("unused.json")
            .parse(r#"{"soNumber": 1}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_rejects_non_object_records() {
        assert!(JsonDatasetProvider::new("unused.json").parse("[1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, r#"[{"soNumber": 123456, "Tank SN_AX": 9981.0}]"#).unwrap();

        let ds = JsonDatasetProvider::new(&path).load().unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.row(0).unwrap().get("Tank SN_AX"), Some(&CellValue::Float(9981.0)));
    }
}
