// Dashboard service - Use case for building and publishing the dashboard
use crate::application::assembler::assemble;
use crate::application::loaders::MetricLoader;
use crate::application::publisher::DashboardPublisher;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::infrastructure::config::PipelineConfig;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub kpis: usize,
    pub widgets: usize,
    pub skipped_rows: usize,
    pub invalid_values: usize,
    pub outputs: Vec<PathBuf>,
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard built successfully ({} KPIs, {} widgets",
            self.kpis, self.widgets
        )?;
        if self.skipped_rows > 0 {
            write!(f, ", {} rows skipped", self.skipped_rows)?;
        }
        if self.invalid_values > 0 {
            write!(f, ", {} invalid values", self.invalid_values)?;
        }
        write!(f, ")")
    }
}

/// Dashboard plus the row accounting gathered while loading it.
#[derive(Debug)]
pub struct BuiltDashboard {
    pub dashboard: Dashboard,
    pub skipped_rows: usize,
    pub invalid_values: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    loader: MetricLoader,
    publishers: Vec<Arc<dyn DashboardPublisher>>,
    config: PipelineConfig,
}

impl DashboardService {
    pub fn new(
        loader: MetricLoader,
        publishers: Vec<Arc<dyn DashboardPublisher>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            loader,
            publishers,
            config,
        }
    }

    /// Run every loader in configured order and assemble the result.
    pub async fn build(&self, generated_at: DateTime<Utc>) -> Result<BuiltDashboard, DashboardError> {
        let mut skipped_rows = 0;
        let mut invalid_values = 0;

        let mut kpi_collections = Vec::with_capacity(self.config.kpi_sources.len());
        for source in &self.config.kpi_sources {
            let outcome = self.loader.load_kpis(source).await?;
            log_outcome(&source.name, outcome.file(), outcome.items().len());
            skipped_rows += outcome.skipped_rows();
            invalid_values += outcome.invalid_values();
            kpi_collections.push(outcome.into_items());
        }

        let mut widget_collections = Vec::with_capacity(self.config.widget_sources.len());
        for source in &self.config.widget_sources {
            let outcome = self.loader.load_widgets(source).await?;
            log_outcome(&source.name, outcome.file(), outcome.items().len());
            skipped_rows += outcome.skipped_rows();
            invalid_values += outcome.invalid_values();
            widget_collections.push(outcome.into_items());
        }

        let dashboard = assemble(
            kpi_collections,
            widget_collections,
            generated_at,
            &self.config.source_label,
        )?;

        Ok(BuiltDashboard {
            dashboard,
            skipped_rows,
            invalid_values,
        })
    }

    /// Build the dashboard and hand it to every publisher in turn.
    /// Nothing is published when the build fails.
    pub async fn run(&self) -> Result<BuildSummary, DashboardError> {
        let built = self.build(Utc::now()).await?;

        let mut outputs = Vec::with_capacity(self.publishers.len());
        for publisher in &self.publishers {
            let path = publisher.publish(&built.dashboard).await?;
            tracing::info!("Published {}", path.display());
            outputs.push(path);
        }

        Ok(BuildSummary {
            kpis: built.dashboard.kpis.len(),
            widgets: built.dashboard.widgets.len(),
            skipped_rows: built.skipped_rows,
            invalid_values: built.invalid_values,
            outputs,
        })
    }
}

fn log_outcome(source: &str, file: Option<&Path>, count: usize) {
    match file {
        Some(file) => tracing::info!("Source {}: {} entries from {}", source, count, file.display()),
        None => tracing::info!("Source {}: no data", source),
    }
}
