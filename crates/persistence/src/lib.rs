//! Dataset providers
//!
//! The order table is exported from the master schedule and loaded once at
//! startup. Two export formats are supported:
//! - CSV with a header row ([`CsvDatasetProvider`])
//! - JSON array of flat records ([`JsonDatasetProvider`])

mod csv_source;
mod json_source;

pub use csv_source::CsvDatasetProvider;
pub use json_source::JsonDatasetProvider;

use order_desk_config::{DatasetConfig, DatasetFormat};
use order_desk_core::DatasetProvider;

/// Create the provider described by the dataset configuration
pub fn create_provider(config: &DatasetConfig) -> Box<dyn DatasetProvider> {
    match config.format.resolve(&config.path) {
        DatasetFormat::Json => Box::new(JsonDatasetProvider::new(&config.path)),
        DatasetFormat::Csv | DatasetFormat::Auto => Box::new(
            CsvDatasetProvider::new(&config.path).with_delimiter(config.csv_delimiter as u8),
        ),
    }
}
