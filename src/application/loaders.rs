// Metric loaders - Map the latest inbox CSV for a source into KPIs or widgets
use crate::application::source_repository::{Record, SourceRepository};
use crate::domain::error::DashboardError;
use crate::domain::metrics::{DataPoint, Kpi, Widget};
use crate::infrastructure::config::{InvalidNumberPolicy, KpiSourceConfig, WidgetSourceConfig};
use crate::infrastructure::number::coerce_number;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const METRIC_COLUMN: &str = "metric";
const VALUE_COLUMN: &str = "value";

/// Result of running one loader. A source with no matching inbox file is
/// `NotFound`, which is never an error.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    NotFound,
    Loaded(Loaded<T>),
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub file: PathBuf,
    pub items: Vec<T>,
    /// Rows dropped under [`InvalidNumberPolicy::Skip`]
    pub skipped_rows: usize,
    /// Non-finite values kept under [`InvalidNumberPolicy::Coerce`]
    pub invalid_values: usize,
}

impl<T> LoadOutcome<T> {
    pub fn file(&self) -> Option<&Path> {
        match self {
            LoadOutcome::NotFound => None,
            LoadOutcome::Loaded(loaded) => Some(&loaded.file),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            LoadOutcome::NotFound => &[],
            LoadOutcome::Loaded(loaded) => &loaded.items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            LoadOutcome::NotFound => Vec::new(),
            LoadOutcome::Loaded(loaded) => loaded.items,
        }
    }

    pub fn skipped_rows(&self) -> usize {
        match self {
            LoadOutcome::NotFound => 0,
            LoadOutcome::Loaded(loaded) => loaded.skipped_rows,
        }
    }

    pub fn invalid_values(&self) -> usize {
        match self {
            LoadOutcome::NotFound => 0,
            LoadOutcome::Loaded(loaded) => loaded.invalid_values,
        }
    }
}

#[derive(Default)]
struct Tally {
    skipped_rows: usize,
    invalid_values: usize,
}

#[derive(Clone)]
pub struct MetricLoader {
    repository: Arc<dyn SourceRepository>,
    policy: InvalidNumberPolicy,
}

impl MetricLoader {
    pub fn new(repository: Arc<dyn SourceRepository>, policy: InvalidNumberPolicy) -> Self {
        Self { repository, policy }
    }

    /// Load a `metric,value` file into KPIs, one per row.
    pub async fn load_kpis(
        &self,
        source: &KpiSourceConfig,
    ) -> Result<LoadOutcome<Kpi>, DashboardError> {
        let Some((file, records)) = self.fetch(&source.name, &source.prefix).await? else {
            return Ok(LoadOutcome::NotFound);
        };

        let mut tally = Tally::default();
        let mut kpis = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let metric = column(&file, record, METRIC_COLUMN)?;
            let Some(value) = self.number(&file, index, record, VALUE_COLUMN, &mut tally)? else {
                continue;
            };
            kpis.push(Kpi::new(metric.to_string(), value));
        }

        tracing::debug!("Source {} produced {} KPIs", source.name, kpis.len());
        Ok(LoadOutcome::Loaded(Loaded {
            file,
            items: kpis,
            skipped_rows: tally.skipped_rows,
            invalid_values: tally.invalid_values,
        }))
    }

    /// Load a breakdown file into line widgets.
    ///
    /// Each configured breakdown whose column appears in the first record yields one
    /// widget pairing that column with the value column, in row order. A file with
    /// none of the breakdown columns yields no widgets.
    pub async fn load_widgets(
        &self,
        source: &WidgetSourceConfig,
    ) -> Result<LoadOutcome<Widget>, DashboardError> {
        let Some((file, records)) = self.fetch(&source.name, &source.prefix).await? else {
            return Ok(LoadOutcome::NotFound);
        };

        let mut tally = Tally::default();
        let mut widgets = Vec::new();
        let Some(first) = records.first() else {
            return Ok(LoadOutcome::Loaded(Loaded {
                file,
                items: widgets,
                skipped_rows: 0,
                invalid_values: 0,
            }));
        };

        let breakdowns: Vec<_> = source
            .breakdowns
            .iter()
            .filter(|breakdown| {
                let present = first.contains_key(&breakdown.column);
                if !present {
                    tracing::debug!(
                        "Source {} has no {} column, skipping widget {}",
                        source.name, breakdown.column, breakdown.id
                    );
                }
                present
            })
            .collect();

        // Converted once per row and shared by every widget.
        let values = if breakdowns.is_empty() {
            Vec::new()
        } else {
            records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    self.number(&file, index, record, &source.value_column, &mut tally)
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        for breakdown in breakdowns {
            let mut data = Vec::with_capacity(records.len());
            for (record, value) in records.iter().zip(&values) {
                let category = column(&file, record, &breakdown.column)?;
                let Some(value) = *value else {
                    continue;
                };
                data.push(DataPoint::new(category.to_string(), value));
            }

            widgets.push(Widget::line(breakdown.id.clone(), breakdown.title.clone(), data));
        }

        tracing::debug!("Source {} produced {} widgets", source.name, widgets.len());
        Ok(LoadOutcome::Loaded(Loaded {
            file,
            items: widgets,
            skipped_rows: tally.skipped_rows,
            invalid_values: tally.invalid_values,
        }))
    }

    async fn fetch(
        &self,
        name: &str,
        prefix: &str,
    ) -> Result<Option<(PathBuf, Vec<Record>)>, DashboardError> {
        let Some(file) = self.repository.latest_file(prefix).await? else {
            tracing::info!("No inbox file for source {} (prefix {})", name, prefix);
            return Ok(None);
        };

        tracing::info!("Loading source {} from {}", name, file.display());
        let records = self.repository.read_records(&file).await?;
        tracing::debug!("Parsed {} records from {}", records.len(), file.display());
        Ok(Some((file, records)))
    }

    /// Convert a numeric cell according to the policy. `None` means drop the row.
    fn number(
        &self,
        file: &Path,
        index: usize,
        record: &Record,
        name: &str,
        tally: &mut Tally,
    ) -> Result<Option<f64>, DashboardError> {
        let raw = column(file, record, name)?;
        let value = coerce_number(raw);
        if value.is_finite() {
            return Ok(Some(value));
        }

        match self.policy {
            InvalidNumberPolicy::Coerce => {
                tracing::warn!(
                    "{} record {}: {} {:?} is not a finite number, publishing null",
                    file.display(),
                    index + 1,
                    name,
                    raw
                );
                tally.invalid_values += 1;
                Ok(Some(value))
            }
            InvalidNumberPolicy::Skip => {
                tracing::warn!(
                    "{} record {}: {} {:?} is not a finite number, skipping row",
                    file.display(),
                    index + 1,
                    name,
                    raw
                );
                tally.skipped_rows += 1;
                Ok(None)
            }
            InvalidNumberPolicy::Reject => Err(DashboardError::InvalidNumber {
                path: file.to_path_buf(),
                record: index + 1,
                column: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

fn column<'r>(file: &Path, record: &'r Record, name: &str) -> Result<&'r str, DashboardError> {
    record
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| DashboardError::MissingColumn {
            path: file.to_path_buf(),
            column: name.to_string(),
        })
}
