//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Login form doubles as the landing page
        .route("/", get(handlers::login_page).post(handlers::login_submit))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/predict",
            get(handlers::predict_page).post(handlers::predict_submit),
        )
        .route("/result", get(handlers::result_page))
        .route("/profile", get(handlers::profile_page))
        .route("/profile_edit", post(handlers::profile_edit))
        .route("/api/stats", get(handlers::api_stats))
        .route("/static/styles.css", get(handlers::serve_css))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
