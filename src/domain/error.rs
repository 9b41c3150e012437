// Error taxonomy for the dashboard pipeline
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cannot read inbox {}: {source}", path.display())]
    Inbox {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: record {record} has non-numeric {column} {value:?}", path.display())]
    InvalidNumber {
        path: PathBuf,
        record: usize,
        column: String,
        value: String,
    },

    #[error("No KPIs generated")]
    NoKpisProduced,

    #[error("cannot serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot publish {}: {source}", path.display())]
    Publish {
        path: PathBuf,
        source: std::io::Error,
    },
}
