//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Chart data is serialized to JSON up front and embedded with `|safe`.

use askama::Template;

use crate::analysis::WordCount;
use crate::extract::BackendAvailability;

use super::session::Session;

/// Layout data shared by every page (nav, flashes, avatar).
pub struct Page {
    pub active: &'static str,
    pub flashes: Vec<String>,
    pub has_flashes: bool,
    pub avatar: String,
}

impl Page {
    pub fn new(active: &'static str, flashes: Vec<String>, session: &Session) -> Self {
        Self {
            active,
            has_flashes: !flashes.is_empty(),
            flashes,
            avatar: session.initial(),
        }
    }
}

/// Helper struct for extractor availability rows.
pub struct ExtractorRow {
    pub format: &'static str,
    pub available: bool,
    pub hint: String,
}

impl From<&BackendAvailability> for ExtractorRow {
    fn from(b: &BackendAvailability) -> Self {
        Self {
            format: b.format,
            available: b.available,
            hint: b.hint.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
    pub total_uploads: u64,
    pub last_label: String,
    pub labels_json: String,
    pub counts_json: String,
    pub model_status: String,
    pub model_loaded: bool,
    pub extractors: Vec<ExtractorRow>,
}

#[derive(Template)]
#[template(path = "predict.html")]
pub struct PredictTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
    pub text_input: String,
    pub has_prediction: bool,
    pub label: String,
    pub classified_by: &'a str,
    pub labels_json: String,
    pub scores_json: String,
    pub top_words: Vec<WordCount>,
    pub summary: String,
    pub has_summary: bool,
    pub digit_labels_json: String,
    pub digit_counts_json: String,
    /// Shown when the text could not be taken from the upload.
    pub notice: String,
    pub has_notice: bool,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
    pub has_prediction: bool,
    pub label: String,
    pub labels_json: String,
    pub scores_json: String,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
    pub name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub page: Page,
    pub message: &'a str,
}
