// Presentation layer - Rendered views of the dashboard
pub mod html_snapshot;
