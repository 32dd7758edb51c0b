use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_PAGE_LIMIT: u32 = 9;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    pub page_limit: u32,
    pub export_dir: PathBuf,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = get_env_or("DASHBOARD_API_URL", DEFAULT_API_URL);
        validate_base_url(&api_base_url)?;

        let page_limit: u32 = get_env_parse_or("PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?;
        if page_limit == 0 {
            return Err(Error::Config("PAGE_LIMIT must be at least 1".to_string()));
        }

        Ok(Self {
            api_base_url,
            api_token: env::var("DASHBOARD_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            request_timeout_secs: get_env_parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            search_debounce_ms: get_env_parse_or("SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?,
            page_limit,
            export_dir: PathBuf::from(get_env_or("EXPORT_DIR", ".")),
        })
    }

    /// Defaults for everything except the API location.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_limit: DEFAULT_PAGE_LIMIT,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid value for DASHBOARD_API_URL: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Unsupported scheme for DASHBOARD_API_URL: {}",
            other
        ))),
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
