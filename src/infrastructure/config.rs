use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "config/dashboard";
const CONFIG_FILE_ENV: &str = "DASHBOARD_CONFIG";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub inbox_dir: PathBuf,
    pub output_path: PathBuf,
    /// Optional static HTML snapshot published next to the JSON document
    pub html_output_path: Option<PathBuf>,
    pub source_label: String,
    pub invalid_numbers: InvalidNumberPolicy,
    /// KPI sources, concatenated in this order
    pub kpi_sources: Vec<KpiSourceConfig>,
    pub widget_sources: Vec<WidgetSourceConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("./inbox"),
            output_path: PathBuf::from("public/dashboard.json"),
            html_output_path: None,
            source_label: "Koha CSV Email".to_string(),
            invalid_numbers: InvalidNumberPolicy::default(),
            kpi_sources: vec![
                KpiSourceConfig::new("circulation", "kpis_circulation_"),
                KpiSourceConfig::new("collection", "collection_metrics_"),
                KpiSourceConfig::new("performance", "performance_"),
            ],
            widget_sources: vec![WidgetSourceConfig {
                name: "equity".to_string(),
                prefix: "equity_".to_string(),
                value_column: "loans".to_string(),
                breakdowns: vec![
                    BreakdownConfig::new("branch", "loans_by_branch", "Loans by Branch"),
                    BreakdownConfig::new("item_type", "loans_by_item_type", "Loans by Item Type"),
                ],
            }],
        }
    }
}

/// What to do with a numeric cell that does not convert to a finite number.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidNumberPolicy {
    /// Keep the value; it is published as `null`
    #[default]
    Coerce,
    /// Drop the row and count it in the run summary
    Skip,
    /// Fail the run
    Reject,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KpiSourceConfig {
    pub name: String,
    pub prefix: String,
}

impl KpiSourceConfig {
    fn new(name: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetSourceConfig {
    pub name: String,
    pub prefix: String,
    pub value_column: String,
    #[serde(default)]
    pub breakdowns: Vec<BreakdownConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BreakdownConfig {
    /// Category column; the widget is emitted only when it is present
    pub column: String,
    pub id: String,
    pub title: String,
}

impl BreakdownConfig {
    fn new(column: &str, id: &str, title: &str) -> Self {
        Self {
            column: column.to_string(),
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Load configuration from the optional config file and `DASHBOARD_*` environment variables.
pub fn load_pipeline_config() -> anyhow::Result<PipelineConfig> {
    let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let builder = config::Config::builder()
        .add_source(config::File::with_name(&file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    deserialize(builder)
}

fn deserialize(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<PipelineConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> PipelineConfig {
        deserialize(
            config::Config::builder()
                .add_source(config::File::from_str(text, config::FileFormat::Toml)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.inbox_dir, PathBuf::from("./inbox"));
        assert_eq!(config.output_path, PathBuf::from("public/dashboard.json"));
        assert_eq!(config.html_output_path, None);
        assert_eq!(config.invalid_numbers, InvalidNumberPolicy::Coerce);

        let prefixes: Vec<_> = config.kpi_sources.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["kpis_circulation_", "collection_metrics_", "performance_"]);
        assert_eq!(config.widget_sources[0].breakdowns.len(), 2);
    }

    #[test]
    fn test_file_overrides() {
        let config = from_toml(
            r#"
            inbox_dir = "/var/spool/koha"
            html_output_path = "public/index.html"
            invalid_numbers = "skip"

            [[kpi_sources]]
            name = "circulation"
            prefix = "circ_"
            "#,
        );

        assert_eq!(config.inbox_dir, PathBuf::from("/var/spool/koha"));
        assert_eq!(config.html_output_path, Some(PathBuf::from("public/index.html")));
        assert_eq!(config.invalid_numbers, InvalidNumberPolicy::Skip);
        assert_eq!(config.kpi_sources.len(), 1);
        assert_eq!(config.widget_sources[0].prefix, "equity_");
    }
}
