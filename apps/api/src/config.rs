use std::path::PathBuf;

use anyhow::{Context, Result};

/// Known placeholder shipped in .env templates. Treated the same as an unset
/// key so analysis fails with a configuration error instead of an API 401.
const OPENAI_KEY_PLACEHOLDER: &str = "your_openai_api_key_here";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when unset, empty, or the placeholder value. The service still
    /// starts; only analysis requests are refused.
    pub openai_api_key: Option<String>,
    pub upload_dir: PathBuf,
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty() && k != OPENAI_KEY_PLACEHOLDER);

        Ok(Config {
            openai_api_key,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
