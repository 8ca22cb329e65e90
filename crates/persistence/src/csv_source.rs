//! CSV export loader
//!
//! The first row holds column names. Cell types are inferred per value, so a
//! column may mix integers and text (as exports often do); inference never
//! changes how a value prints.

use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

use order_desk_core::{CellValue, Dataset, DatasetProvider, Error, Result};

/// Loads a dataset from a delimited text file
#[derive(Debug, Clone)]
pub struct CsvDatasetProvider {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDatasetProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV from any reader
    pub fn read_from<R: std::io::Read>(&self, reader: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| Error::Parse(format!("failed to read CSV header: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let width = headers.len();
        let mut dataset = Dataset::new(headers)?;

        for (idx, record) in rdr.records().enumerate() {
            let record =
                record.map_err(|e| Error::Parse(format!("CSV record {}: {}", idx + 1, e)))?;

            if record.len() > width {
                tracing::warn!(
                    record = idx + 1,
                    fields = record.len(),
                    expected = width,
                    "Dropping extra CSV fields"
                );
            }

            let mut row: Vec<CellValue> = record.iter().take(width).map(CellValue::infer).collect();
            row.resize(width, CellValue::Missing);
            dataset.push_row(row)?;
        }

        Ok(dataset)
    }
}

impl DatasetProvider for CsvDatasetProvider {
    fn load(&self) -> Result<Dataset> {
        let file = std::fs::File::open(&self.path)?;
        let dataset = self.read_from(file)?;
        tracing::info!(
            path = %self.path.display(),
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Loaded CSV dataset"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
