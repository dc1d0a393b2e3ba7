//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod classify;
mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "moodify")]
#[command(about = "Sentiment analysis for typed text and uploaded documents")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config file and MOODIFY_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to: PORT, HOST, HOST:PORT or [IPV6]:PORT (default: 127.0.0.1:3030)
        #[arg(short, long, default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// Classify text or a file once and print the report
    Classify {
        /// Text to classify (used when no file is given)
        #[arg(short, long)]
        text: Option<String>,
        /// File to classify (.txt, .pdf or .docx)
        file: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show model status, extractor availability and resolved paths
    Status,
}

/// Parse arguments, load settings and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };
    let (settings, _config) = load_settings_with_options(options).await?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Classify { text, file, json } => {
            classify::cmd_classify(&settings, text.as_deref(), file, json).await
        }
        Commands::Status => status::cmd_status(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve_default_bind() {
        let cli = Cli::try_parse_from(["moodify", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind, "127.0.0.1:3030"),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_cli_parses_classify_with_globals() {
        let cli = Cli::try_parse_from([
            "moodify",
            "classify",
            "--text",
            "great day",
            "--json",
            "--data-dir",
            "/tmp/moodify",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/moodify")));
        match cli.command {
            Commands::Classify { text, file, json } => {
                assert_eq!(text.as_deref(), Some("great day"));
                assert!(file.is_none());
                assert!(json);
            }
            _ => panic!("expected classify"),
        }
    }
}
