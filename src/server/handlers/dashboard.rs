//! Dashboard handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::super::session::{take_flashes, RequireAuth};
use super::super::template_structs::{DashboardTemplate, ExtractorRow, Page};
use super::super::AppState;
use super::helpers::render;
use crate::utils::script_json;

/// Upload statistics, label chart, and engine status.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    jar: SignedCookieJar,
) -> Response {
    let (jar, flashes) = take_flashes(jar);
    let stats = state.pipeline.stats().snapshot();

    let template = DashboardTemplate {
        title: "Dashboard",
        page: Page::new("dashboard", flashes, &session),
        total_uploads: stats.total_uploads,
        last_label: stats.last_label.clone().unwrap_or_else(|| "None".to_string()),
        labels_json: script_json(&stats.labels),
        counts_json: script_json(&stats.counts),
        model_status: state.model_status.to_string(),
        model_loaded: state.model_status.is_loaded(),
        extractors: state.extractors.iter().map(ExtractorRow::from).collect(),
    };

    (jar, render(&template)).into_response()
}
