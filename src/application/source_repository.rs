// Repository trait for inbox CSV access
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One CSV data row keyed by header column name.
pub type Record = HashMap<String, String>;

#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Latest inbox file whose name starts with `prefix`, if any
    async fn latest_file(&self, prefix: &str) -> Result<Option<PathBuf>, DashboardError>;

    /// Parse a CSV file into records, in file order
    async fn read_records(&self, path: &Path) -> Result<Vec<Record>, DashboardError>;
}
