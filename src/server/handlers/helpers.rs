//! Helper functions shared by the page handlers.

use askama::Template;
use axum::response::Html;

/// Render a template, falling back to the error text on failure.
pub fn render<T: Template>(template: &T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}
