use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed numbers fail.
#[derive(Debug, Clone)]
pub struct Config {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Optional YAML registry replacing the built-in version profiles.
    pub versions_file: Option<PathBuf>,
    pub stylesheet: String,
    pub print_stylesheet: String,
    pub file_stem: String,
    /// Directory holding `assets/` and the stylesheets copied next to HTML output.
    pub asset_root: PathBuf,
    pub render_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let render_timeout_secs = env_or("CV_RENDER_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("CV_RENDER_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            content_dir: env_or("CV_CONTENT_DIR", "content").into(),
            output_dir: env_or("CV_OUTPUT_DIR", "output").into(),
            versions_file: std::env::var("CV_VERSIONS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            stylesheet: env_or("CV_STYLESHEET", "css_styling.css"),
            print_stylesheet: env_or("CV_PRINT_STYLESHEET", "css_styling_print.css"),
            file_stem: env_or("CV_FILE_STEM", "cv"),
            asset_root: env_or("CV_ASSET_ROOT", ".").into(),
            render_timeout: Duration::from_secs(render_timeout_secs),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Applies command-line directory overrides.
    pub fn with_dirs(mut self, content_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = content_dir {
            self.content_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
