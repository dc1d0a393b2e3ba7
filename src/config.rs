//! Configuration management for Moodify using the prefer crate.
//!
//! Settings are resolved from, lowest precedence first: built-in defaults,
//! a config file (auto-discovered or given with `--config`), environment
//! variables, and command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::DEFAULT_TOP_WORDS;
use crate::extract::ExtractorOptions;

/// Session signing secret used when none is configured.
pub const DEFAULT_SECRET: &str = "change_me_to_a_random_secret_key";

/// Model artifact filename under the data directory.
pub const DEFAULT_MODEL_FILENAME: &str = "sentiment_model.json";

/// Default cap on request bodies (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const UPLOADS_SUBDIR: &str = "uploads";

/// Errors loading an explicitly requested config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Where uploaded files are stored before extraction.
    pub uploads_dir: PathBuf,
    /// Serialized model artifact loaded at startup.
    pub model_path: PathBuf,
    /// Secret used to sign session cookies.
    pub secret_key: String,
    /// Number of top words reported per prediction.
    pub top_words: usize,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// pdftotext executable name or path.
    pub pdftotext_binary: String,
    /// Whether .docx extraction is enabled.
    pub enable_docx: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moodify")
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_data_dir(default_data_dir())
    }
}

impl Settings {
    /// Create settings rooted at a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            uploads_dir: data_dir.join(UPLOADS_SUBDIR),
            model_path: data_dir.join(DEFAULT_MODEL_FILENAME),
            data_dir,
            secret_key: DEFAULT_SECRET.to_string(),
            top_words: DEFAULT_TOP_WORDS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            pdftotext_binary: "pdftotext".to_string(),
            enable_docx: true,
        }
    }

    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            pdftotext_binary: self.pdftotext_binary.clone(),
            enable_docx: self.enable_docx,
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET
    }

    /// Create the uploads directory if it does not exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.uploads_dir)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Upload directory (defaults to `<data_dir>/uploads`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploads_dir: Option<String>,
    /// Model artifact path (defaults to `<data_dir>/sentiment_model.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    /// Session signing secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Number of top words to report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_words: Option<usize>,
    /// Maximum request body size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    /// pdftotext executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdftotext_binary: Option<String>,
    /// Enable .docx extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_docx: Option<bool>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no file is found or it cannot be parsed.
    pub async fn load() -> Self {
        match prefer::load("moodify").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

/// Settings taken from environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub data_dir: Option<String>,
    pub model_path: Option<String>,
    pub secret_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|s| !s.is_empty());
        Self {
            data_dir: var("MOODIFY_DATA_DIR"),
            model_path: var("MOODIFY_MODEL_PATH"),
            secret_key: var("MOODIFY_SECRET"),
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory (--data-dir flag).
    pub data_dir: Option<PathBuf>,
}

/// Combine config file, environment and flags into [`Settings`].
pub fn resolve_settings(
    config: &Config,
    env: &EnvOverrides,
    options: &LoadOptions,
    base_dir: &Path,
) -> Settings {
    let expand = |s: &str| PathBuf::from(shellexpand::tilde(s).as_ref());

    let data_dir = options
        .data_dir
        .clone()
        .or_else(|| env.data_dir.as_deref().map(expand))
        .or_else(|| {
            config
                .data_dir
                .as_deref()
                .map(|d| config.resolve_path(d, base_dir))
        })
        .unwrap_or_else(default_data_dir);

    let mut settings = Settings::with_data_dir(data_dir);

    if let Some(ref uploads) = config.uploads_dir {
        settings.uploads_dir = config.resolve_path(uploads, base_dir);
    }
    if let Some(model) = env.model_path.as_deref().map(expand).or_else(|| {
        config
            .model_path
            .as_deref()
            .map(|m| config.resolve_path(m, base_dir))
    }) {
        settings.model_path = model;
    }
    if let Some(secret) = env.secret_key.clone().or_else(|| config.secret_key.clone()) {
        settings.secret_key = secret;
    }
    if let Some(n) = config.top_words {
        settings.top_words = n;
    }
    if let Some(limit) = config.max_upload_bytes {
        settings.max_upload_bytes = limit;
    }
    if let Some(ref binary) = config.pdftotext_binary {
        settings.pdftotext_binary = binary.clone();
    }
    if let Some(enabled) = config.enable_docx {
        settings.enable_docx = enabled;
    }

    settings
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let settings = resolve_settings(&config, &EnvOverrides::from_env(), &options, &base_dir);

    if settings.uses_default_secret() {
        tracing::warn!("Using the default session secret; set MOODIFY_SECRET in production");
    }

    Ok((settings, config))
}
