// Publisher trait - Where a finished dashboard goes
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait DashboardPublisher: Send + Sync {
    /// Publish the whole document, replacing any previous one. Returns the final path.
    async fn publish(&self, dashboard: &Dashboard) -> Result<PathBuf, DashboardError>;
}
