//! Configuration module
//!
//! Settings are read once at startup from the process environment (with `.env`
//! support through dotenvy). Every variable has a primary name and, where the
//! deployment history calls for it, a legacy fallback name.

use std::env;
use std::time::Duration;

use crate::formats::parse_format_names;

const DEFAULT_CATALOG_API_URL: &str = "https://app.iconik.io";
const DEFAULT_FORMAT_NAMES: &str = "ORIGINAL,PPRO_PROXY";
const DEFAULT_PORT: u16 = 8080;
const JOB_POLL_INTERVAL_MS: u64 = 1000;
const CATALOG_TIMEOUT_SECS: u64 = 60;

/// Log output format for the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub shared_secret: String,
    pub catalog_app_id: String,
    pub catalog_api_url: String,
    pub format_names: Vec<String>,
    pub edge_storage_id: Option<String>,
    pub object_storage_id: Option<String>,
    pub server_port: u16,
    pub environment: String,
    /// Await add-path copy jobs inside the request instead of spawning them.
    pub synchronous_processing: bool,
    pub job_poll_interval_ms: u64,
    pub catalog_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |primary: &str, fallback: Option<&str>| -> Option<String> {
            lookup(primary)
                .or_else(|| fallback.and_then(|name| lookup(name)))
                .filter(|value| !value.trim().is_empty())
        };

        let server_port = match var("PORT", None) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let job_poll_interval_ms = var("JOB_POLL_INTERVAL_MS", None)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(JOB_POLL_INTERVAL_MS);

        let catalog_timeout_secs = var("CATALOG_TIMEOUT_SECS", None)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(CATALOG_TIMEOUT_SECS);

        let log_format = match var("LOG_FORMAT", None).as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let config = Config {
            shared_secret: var("SHARED_SECRET", Some("BZ_SHARED_SECRET")).unwrap_or_default(),
            catalog_app_id: var("CATALOG_APP_ID", Some("ICONIK_ID")).unwrap_or_default(),
            catalog_api_url: var("CATALOG_API_URL", Some("ICONIK_API_URL"))
                .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            format_names: parse_format_names(
                &var("FORMAT_NAMES", None).unwrap_or_else(|| DEFAULT_FORMAT_NAMES.to_string()),
            ),
            edge_storage_id: var("EDGE_STORAGE_ID", Some("LL_STORAGE_ID")),
            object_storage_id: var("OBJECT_STORAGE_ID", Some("B2_STORAGE_ID")),
            server_port,
            environment: var("ENVIRONMENT", Some("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
            synchronous_processing: var("SYNCHRONOUS_PROCESSING", None)
                .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            job_poll_interval_ms,
            catalog_timeout_secs,
            log_format,
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.shared_secret.is_empty() {
            return Err(anyhow::anyhow!(
                "SHARED_SECRET (or BZ_SHARED_SECRET) must be set"
            ));
        }

        if self.catalog_app_id.is_empty() {
            return Err(anyhow::anyhow!("CATALOG_APP_ID (or ICONIK_ID) must be set"));
        }

        if self.format_names.is_empty() {
            return Err(anyhow::anyhow!(
                "FORMAT_NAMES must contain at least one format name"
            ));
        }

        if !self.catalog_api_url.starts_with("http://")
            && !self.catalog_api_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "CATALOG_API_URL must be an http(s) URL, got {}",
                self.catalog_api_url
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn job_poll_interval(&self) -> Duration {
        Duration::from_millis(self.job_poll_interval_ms)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }
}
