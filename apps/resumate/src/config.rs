use std::path::PathBuf;

use anyhow::Result;

/// Application configuration loaded from environment variables.
///
/// Nothing here is strictly required: the editor works fully offline and the
/// API key is only checked when the user actually requests an AI review.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key for the AI review backend. Optional — preview and
    /// export never touch the network.
    pub anthropic_api_key: Option<String>,
    /// Override for the local persistence directory.
    pub data_dir: Option<PathBuf>,
    /// Directory the exported PDF is written to. Defaults to the working dir.
    pub export_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            data_dir: std::env::var("RESUMATE_DATA_DIR").ok().map(PathBuf::from),
            export_dir: std::env::var("RESUMATE_EXPORT_DIR").ok().map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Resolves the directory holding the persisted resume and style records.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resumate")
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
