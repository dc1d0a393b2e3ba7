//! Web interface for sentiment predictions.
//!
//! Provides:
//! - A name/email login kept in a signed session cookie
//! - A dashboard with upload statistics and charts
//! - A prediction form accepting typed text or an uploaded file
//! - A result page and a small profile editor

mod assets;
mod handlers;
mod routes;
pub mod session;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::classifier::{load_classifier, Classifier, ModelStatus};
use crate::config::Settings;
use crate::extract::{BackendAvailability, Extractors};
use crate::pipeline::Pipeline;
use crate::stats::StatsAggregator;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub model_status: Arc<ModelStatus>,
    pub extractors: Arc<Vec<BackendAvailability>>,
    pub max_upload_bytes: usize,
    cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    /// Load the model and detect extraction backends.
    pub fn new(settings: &Settings) -> Self {
        let (classifier, model_status) = load_classifier(&settings.model_path);
        if model_status.is_loaded() {
            tracing::info!("{}", model_status);
        } else {
            tracing::warn!("{}", model_status);
        }

        let extractors = Extractors::detect(&settings.extractor_options());
        Self::from_parts(settings, classifier, model_status, extractors)
    }

    pub fn from_parts(
        settings: &Settings,
        classifier: Classifier,
        model_status: ModelStatus,
        extractors: Extractors,
    ) -> Self {
        let availability = extractors.availability();
        let pipeline = Pipeline::new(
            Arc::new(classifier),
            Arc::new(extractors),
            Arc::new(StatsAggregator::new()),
            settings.uploads_dir.clone(),
            settings.top_words,
        );

        Self {
            pipeline,
            model_status: Arc::new(model_status),
            extractors: Arc::new(availability),
            max_upload_bytes: settings.max_upload_bytes,
            cookie_key: session::cookie_key(&settings.secret_key),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
