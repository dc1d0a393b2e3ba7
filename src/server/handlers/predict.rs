//! Prediction form handlers.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::super::session::{push_flash, take_flashes, RequireAuth, Session};
use super::super::template_structs::{ErrorTemplate, Page, PredictTemplate};
use super::super::AppState;
use super::helpers::render;
use crate::pipeline::{PipelineReport, PredictInput, TextOrigin, UploadedFile};
use crate::utils::script_json;

/// Raw multipart fields of the prediction form.
#[derive(Debug, Default)]
struct PredictForm {
    text_input: String,
    file: Option<UploadedFile>,
}

async fn read_form(mut multipart: Multipart) -> Result<PredictForm, MultipartError> {
    let mut form = PredictForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("text_input") => form.text_input = field.text().await?,
            Some("file_input") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn notice_for(report: &PipelineReport) -> Option<&'static str> {
    if report.classified_by == "degraded" {
        return Some("The model could not classify this input.");
    }
    match report.origin {
        TextOrigin::ExtractionUnavailable => {
            Some("No text extractor is installed for this file type; empty text was classified.")
        }
        TextOrigin::ExtractionFailed => {
            Some("Text could not be read from this file; empty text was classified.")
        }
        TextOrigin::Typed | TextOrigin::Extracted => None,
    }
}

fn predict_template(
    session: &Session,
    flashes: Vec<String>,
    text_input: String,
    report: Option<PipelineReport>,
) -> PredictTemplate<'static> {
    let page = Page::new("predict", flashes, session);

    let Some(report) = report else {
        return PredictTemplate {
            title: "Predict",
            page,
            text_input,
            has_prediction: false,
            label: String::new(),
            classified_by: "",
            labels_json: "[]".to_string(),
            scores_json: "[]".to_string(),
            top_words: Vec::new(),
            summary: String::new(),
            has_summary: false,
            digit_labels_json: "[]".to_string(),
            digit_counts_json: "[]".to_string(),
            notice: String::new(),
            has_notice: false,
        };
    };

    let notice = notice_for(&report);
    let digit_labels: Vec<&str> = report.digits.iter().map(|d| d.digit.as_str()).collect();
    let digit_counts: Vec<usize> = report.digits.iter().map(|d| d.count).collect();

    PredictTemplate {
        title: "Predict",
        page,
        text_input,
        has_prediction: true,
        label: report.prediction.label.clone(),
        classified_by: report.classified_by,
        labels_json: script_json(&report.prediction.labels),
        scores_json: script_json(&report.prediction.scores),
        has_summary: !report.summary.is_empty(),
        digit_labels_json: script_json(&digit_labels),
        digit_counts_json: script_json(&digit_counts),
        top_words: report.top_words,
        summary: report.summary,
        notice: notice.unwrap_or_default().to_string(),
        has_notice: notice.is_some(),
    }
}

/// Show the empty prediction form.
pub async fn predict_page(RequireAuth(session): RequireAuth, jar: SignedCookieJar) -> Response {
    let (jar, flashes) = take_flashes(jar);
    let template = predict_template(&session, flashes, String::new(), None);
    (jar, render(&template)).into_response()
}

/// Classify typed text or an uploaded file.
pub async fn predict_submit(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Rejected prediction form: {}", e);
            let (jar, flashes) = take_flashes(jar);
            let msg = format!("Could not read the submitted form: {}", e.body_text());
            let template = ErrorTemplate {
                title: "Invalid submission",
                page: Page::new("predict", flashes, &session),
                message: &msg,
            };
            return (e.status(), jar, render(&template)).into_response();
        }
    };

    let Some(input) = PredictInput::choose(&form.text_input, form.file) else {
        let jar = push_flash(jar, "Provide text input or file");
        return (jar, Redirect::to("/predict")).into_response();
    };

    let report = state.pipeline.run(input).await;

    let (jar, flashes) = take_flashes(jar);
    let template = predict_template(&session, flashes, form.text_input, Some(report));
    (StatusCode::OK, jar, render(&template)).into_response()
}
