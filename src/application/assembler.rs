// Dashboard assembler - Merge loader output into one document
use crate::domain::dashboard::{Dashboard, DashboardMeta, SCHEMA_VERSION};
use crate::domain::error::DashboardError;
use crate::domain::metrics::{Kpi, Widget};
use chrono::{DateTime, SecondsFormat, Utc};

/// Concatenate KPI and widget collections in the order given.
///
/// Duplicate ids across collections are kept. Fails with
/// [`DashboardError::NoKpisProduced`] when every KPI collection is empty.
pub fn assemble(
    kpi_collections: Vec<Vec<Kpi>>,
    widget_collections: Vec<Vec<Widget>>,
    generated_at: DateTime<Utc>,
    source: &str,
) -> Result<Dashboard, DashboardError> {
    let kpis: Vec<Kpi> = kpi_collections.into_iter().flatten().collect();
    if kpis.is_empty() {
        return Err(DashboardError::NoKpisProduced);
    }

    let widgets: Vec<Widget> = widget_collections.into_iter().flatten().collect();

    let meta = DashboardMeta {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        source: source.to_string(),
        schema_version: SCHEMA_VERSION,
    };

    Ok(Dashboard::new(meta, kpis, widgets))
}
