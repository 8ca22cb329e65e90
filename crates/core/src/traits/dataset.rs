//! Dataset loading interface

use crate::{Dataset, Result};

/// Source of the order table
///
/// Called once per session, before any question is answered. The returned
/// dataset is read-only from then on.
pub trait DatasetProvider: Send + Sync {
    fn load(&self) -> Result<Dataset>;

    /// Human readable source description for logs
    fn describe(&self) -> String;
}
