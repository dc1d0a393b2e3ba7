//! Result page handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::super::session::{take_flashes, RequireAuth};
use super::super::template_structs::{Page, ResultTemplate};
use super::super::AppState;
use super::helpers::render;
use crate::utils::script_json;

/// Last recorded label, charted against the per-label counts seen so far.
pub async fn result_page(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    jar: SignedCookieJar,
) -> Response {
    let (jar, flashes) = take_flashes(jar);
    let stats = state.pipeline.stats().snapshot();

    let template = ResultTemplate {
        title: "Result",
        page: Page::new("result", flashes, &session),
        has_prediction: stats.last_label.as_deref().is_some_and(|l| !l.is_empty()),
        label: stats.last_label.clone().unwrap_or_default(),
        labels_json: script_json(&stats.labels),
        scores_json: script_json(&stats.counts),
    };

    (jar, render(&template)).into_response()
}
