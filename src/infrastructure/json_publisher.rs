// JSON file publisher
use crate::application::publisher::DashboardPublisher;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::infrastructure::atomic_file::write_atomic;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonFilePublisher {
    output_path: PathBuf,
}

impl JsonFilePublisher {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

#[async_trait]
impl DashboardPublisher for JsonFilePublisher {
    async fn publish(&self, dashboard: &Dashboard) -> Result<PathBuf, DashboardError> {
        let json = dashboard.to_json()?;
        publish_bytes(self.output_path.clone(), json.into_bytes()).await
    }
}

/// Atomically write `bytes` to `path` on the blocking pool.
pub async fn publish_bytes(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, DashboardError> {
    tracing::debug!("Writing {} bytes to {}", bytes.len(), path.display());

    let target = path.clone();
    let result = tokio::task::spawn_blocking(move || write_atomic(&target, &bytes))
        .await
        .unwrap_or_else(|join_err| Err(std::io::Error::other(join_err)));

    result.map_err(|source| DashboardError::Publish {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
