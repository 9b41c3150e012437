// Dashboard domain model
use super::metrics::{Kpi, Widget};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMeta {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub generated_at: String,
    pub source: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub meta: DashboardMeta,
    pub kpis: Vec<Kpi>,
    pub widgets: Vec<Widget>,
}

impl Dashboard {
    pub fn new(meta: DashboardMeta, kpis: Vec<Kpi>, widgets: Vec<Widget>) -> Self {
        Self { meta, kpis, widgets }
    }

    /// Indented JSON, the published form of the document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
