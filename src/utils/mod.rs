//! Shared utility functions.
//!
//! - `filename`: upload extension checks and filename sanitizing
//! - `html`: embedding JSON inside inline `<script>` blocks

mod filename;
mod html;

pub use filename::{allowed_extension, sanitize_filename, ALLOWED_EXTENSIONS};
pub use html::script_json;
