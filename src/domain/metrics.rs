// Metric domain models: KPI tiles and chart widgets
use super::label::humanize;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub label: String,
    #[serde(deserialize_with = "nullable_number")]
    pub value: f64,
}

impl Kpi {
    /// Build a KPI from its metric key, deriving the label.
    pub fn new(id: String, value: f64) -> Self {
        let label = humanize(&id);
        Self { id, label, value }
    }
}

/// A single category/value point. The category is serialized as `month`
/// even when it holds a branch name or item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub month: String,
    #[serde(deserialize_with = "nullable_number")]
    pub value: f64,
}

impl DataPoint {
    pub fn new(month: String, value: f64) -> Self {
        Self { month, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Line,
    /// Any type this crate does not produce; renderers skip it.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    pub data: Vec<DataPoint>,
}

impl Widget {
    pub fn line(id: String, title: String, data: Vec<DataPoint>) -> Self {
        Self {
            id,
            kind: WidgetKind::Line,
            title,
            data,
        }
    }
}

/// Non-finite values are published as `null`; read them back as NaN.
fn nullable_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_label_derived_from_id() {
        let kpi = Kpi::new("total_loans".to_string(), 1500.0);
        assert_eq!(kpi.label, "Total Loans");
        assert_eq!(kpi.id, "total_loans");
    }

    #[test]
    fn test_widget_serializes_type_and_month() {
        let widget = Widget::line(
            "loans_by_branch".to_string(),
            "Loans by Branch".to_string(),
            vec![DataPoint::new("Main".to_string(), 120.0)],
        );

        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"][0]["month"], "Main");
        assert_eq!(json["data"][0]["value"], 120.0);
    }

    #[test]
    fn test_unknown_widget_type_deserializes_as_unsupported() {
        let widget: Widget = serde_json::from_str(
            r#"{"id":"x","type":"pie","title":"X","data":[]}"#,
        )
        .unwrap();
        assert_eq!(widget.kind, WidgetKind::Unsupported);
    }

    #[test]
    fn test_non_finite_value_serializes_as_null() {
        let kpi = Kpi::new("bad_metric".to_string(), f64::NAN);
        let json = serde_json::to_value(&kpi).unwrap();
        assert!(json["value"].is_null());
    }

    #[test]
    fn test_null_value_reads_back_as_nan() {
        let kpi: Kpi = serde_json::from_str(
            r#"{"id":"bad_metric","label":"Bad Metric","value":null}"#,
        )
        .unwrap();
        assert!(kpi.value.is_nan());

        let point: DataPoint = serde_json::from_str(r#"{"month":"Main","value":null}"#).unwrap();
        assert!(point.value.is_nan());

        let point: DataPoint = serde_json::from_str(r#"{"month":"West","value":95}"#).unwrap();
        assert_eq!(point.value, 95.0);
    }
}
