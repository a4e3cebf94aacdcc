use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DEFAULT_USER: &str = "local";
pub(crate) const DEFAULT_CURRENCY: &str = "₹";
const DB_FILE_NAME: &str = "spendwise.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) user: String,
    pub(crate) currency: String,
    pub(crate) log_format: LogFormat,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = match var("SPENDWISE_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let log_format = match var("SPENDWISE_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            db_path,
            user: var("SPENDWISE_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            currency: var("SPENDWISE_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            log_format,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendwise", "Spendwise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE_NAME))
}
