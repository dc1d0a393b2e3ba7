//! HTTP request handlers for the web server.

mod api;
mod auth;
mod dashboard;
mod helpers;
mod predict;
mod profile;
mod result;
mod static_files;

// Re-export handlers for use by the router
pub use api::api_stats;
pub use auth::{login_page, login_submit, logout};
pub use dashboard::dashboard;
pub use predict::{predict_page, predict_submit};
pub use profile::{profile_edit, profile_page};
pub use result::result_page;
pub use static_files::serve_css;
