use std::fmt;
use std::time::Duration;

use crate::sheets::cache::DEFAULT_TTL_SECS;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Runtime settings, read from the environment (and `.env` in `main`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub spreadsheet_id: String,
    pub service_account_json: Option<String>,
    pub api_base: String,
    pub cache_ttl: Duration,
    pub bind_addr: String,
    pub session_key: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value } => write!(f, "{key} has an invalid value: {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let spreadsheet_id = get("SPREADSHEET_ID").ok_or(ConfigError::Missing("SPREADSHEET_ID"))?;

        let cache_ttl = match get("CACHE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid { key: "CACHE_TTL_SECS", value: raw })?,
            None => Duration::from_secs(DEFAULT_TTL_SECS),
        };

        Ok(Self {
            spreadsheet_id,
            service_account_json: get("GCP_SERVICE_ACCOUNT_JSON"),
            api_base: get("SHEETS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            cache_ttl,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: get("SESSION_KEY"),
        })
    }
}
