//! Moodify - sentiment analysis for typed text and uploaded documents.
//!
//! A small web application and CLI that classifies text (typed, or extracted
//! from .txt/.pdf/.docx uploads) and reports top words, a whitespace-normalized
//! summary, digit frequencies, and running label counts.

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod server;
pub mod stats;
mod utils;
