// Filesystem inbox repository implementation
use crate::application::source_repository::{Record, SourceRepository};
use crate::domain::error::DashboardError;
use crate::infrastructure::csv_reader::read_csv;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FsInboxRepository {
    inbox_dir: PathBuf,
}

impl FsInboxRepository {
    pub fn new(inbox_dir: PathBuf) -> Self {
        Self { inbox_dir }
    }

    async fn list_file_names(&self) -> Result<Vec<String>, DashboardError> {
        let inbox_error = |source| DashboardError::Inbox {
            path: self.inbox_dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.inbox_dir)
            .await
            .map_err(inbox_error)?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(inbox_error)? {
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::warn!("Ignoring non UTF-8 inbox entry {:?}", name),
            }
        }

        Ok(names)
    }
}

/// Lexicographically greatest name starting with `prefix`.
///
/// Names are expected to carry a fixed-width timestamp after the prefix, so the
/// greatest name is the most recent export.
pub fn select_latest<'a, I>(names: I, prefix: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().filter(|name| name.starts_with(prefix)).max()
}

#[async_trait]
impl SourceRepository for FsInboxRepository {
    async fn latest_file(&self, prefix: &str) -> Result<Option<PathBuf>, DashboardError> {
        let names = self.list_file_names().await?;
        let latest = select_latest(names.iter().map(String::as_str), prefix)
            .map(|name| self.inbox_dir.join(name));

        tracing::debug!("Latest file for prefix {}: {:?}", prefix, latest);
        Ok(latest)
    }

    async fn read_records(&self, path: &Path) -> Result<Vec<Record>, DashboardError> {
        read_csv(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_select_latest() {
        let names = [
            "equity_2024-02-01.csv",
            "kpis_circulation_2024-01-01.csv",
            "kpis_circulation_2024-03-01.csv",
            "kpis_circulation_2023-12-31.csv",
            "old_kpis_circulation_2099-01-01.csv",
        ];

        assert_eq!(
            select_latest(names, "kpis_circulation_"),
            Some("kpis_circulation_2024-03-01.csv")
        );
        assert_eq!(select_latest(names, "equity_"), Some("equity_2024-02-01.csv"));
        assert_eq!(select_latest(names, "performance_"), None);
        assert_eq!(select_latest([], "equity_"), None);
    }

    #[test]
    fn test_select_latest_is_plain_string_order() {
        // Non zero-padded dates sort as text, not as dates.
        let names = ["performance_2024-9-1.csv", "performance_2024-10-1.csv"];
        assert_eq!(select_latest(names, "performance_"), Some("performance_2024-9-1.csv"));
    }

    #[tokio::test]
    async fn test_latest_file_in_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("equity_2024-01-01.csv"), "branch,loans\n").unwrap();
        fs::write(dir.path().join("equity_2024-02-01.csv"), "branch,loans\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let repository = FsInboxRepository::new(dir.path().to_path_buf());
        assert_eq!(
            repository.latest_file("equity_").await.unwrap(),
            Some(dir.path().join("equity_2024-02-01.csv"))
        );
        assert_eq!(repository.latest_file("performance_").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_inbox_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = FsInboxRepository::new(dir.path().join("missing"));

        let err = repository.latest_file("equity_").await.unwrap_err();
        assert!(matches!(err, DashboardError::Inbox { .. }));
    }
}
