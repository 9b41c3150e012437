// Static HTML snapshot of the dashboard document
use crate::application::publisher::DashboardPublisher;
use crate::domain::dashboard::{Dashboard, DashboardMeta};
use crate::domain::error::DashboardError;
use crate::domain::metrics::{Kpi, Widget, WidgetKind};
use crate::infrastructure::json_publisher::publish_bytes;
use async_trait::async_trait;
use std::path::PathBuf;

/// Publishes the rendered page through the same atomic writer as the JSON document.
#[derive(Debug, Clone)]
pub struct HtmlSnapshotPublisher {
    output_path: PathBuf,
}

impl HtmlSnapshotPublisher {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

#[async_trait]
impl DashboardPublisher for HtmlSnapshotPublisher {
    async fn publish(&self, dashboard: &Dashboard) -> Result<PathBuf, DashboardError> {
        let html = render_html(dashboard);
        publish_bytes(self.output_path.clone(), html.into_bytes()).await
    }
}

/// Render the page: last-updated line, one tile per KPI, one list per line widget.
/// Widgets of any other type are left out.
pub fn render_html(dashboard: &Dashboard) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&dashboard.meta.source)));
    html.push_str("</head>\n<body>\n");

    render_meta(&mut html, &dashboard.meta);

    html.push_str("<div id=\"kpis\" class=\"row g-3\">\n");
    for kpi in &dashboard.kpis {
        render_kpi(&mut html, kpi);
    }
    html.push_str("</div>\n");

    html.push_str("<div id=\"widgets\">\n");
    for widget in &dashboard.widgets {
        match widget.kind {
            WidgetKind::Line => render_line_widget(&mut html, widget),
            WidgetKind::Unsupported => {
                tracing::debug!("Skipping widget {} of unsupported type", widget.id);
            }
        }
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn render_meta(html: &mut String, meta: &DashboardMeta) {
    let updated = chrono::DateTime::parse_from_rfc3339(&meta.generated_at)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| meta.generated_at.clone());
    html.push_str(&format!(
        "<p id=\"last-updated\">Last updated: {}</p>\n",
        escape(&updated)
    ));
}

fn render_kpi(html: &mut String, kpi: &Kpi) {
    html.push_str(&format!(
        "<div class=\"col-12 col-sm-6 col-lg-3\">\
         <div class=\"border rounded p-3 h-100\">\
         <div class=\"text-muted small\">{}</div>\
         <div class=\"fs-3 fw-bold\">{}</div>\
         </div></div>\n",
        escape(&kpi.label),
        format_number(kpi.value)
    ));
}

fn render_line_widget(html: &mut String, widget: &Widget) {
    html.push_str("<div class=\"widget\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape(&widget.title)));
    html.push_str("<ul>\n");
    for point in &widget.data {
        html.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape(&point.month),
            format_number(point.value)
        ));
    }
    html.push_str("</ul>\n</div>\n");
}

/// en-US style number: comma thousands grouping, at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
