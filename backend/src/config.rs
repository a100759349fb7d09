//! Runtime configuration read from the environment.
//!
//! `main` loads an optional `.env` file first, so every variable can also be
//! set there during development.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_DATABASE_URL: &str = "sqlite:monthly_report.db";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub data_dir: PathBuf,
    pub cors_origin: CorsOrigin,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; unset or blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("REPORT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("REPORT_BIND_ADDR must be a socket address such as 127.0.0.1:8000")?;

        let max_upload_bytes = match get("REPORT_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("REPORT_MAX_UPLOAD_BYTES must be a byte count, got '{}'", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let cors_origin = match get("REPORT_CORS_ORIGIN") {
            Some(origin) if origin == "*" => CorsOrigin::Any,
            Some(origin) => CorsOrigin::Exact(origin),
            None => CorsOrigin::Exact(DEFAULT_CORS_ORIGIN.to_string()),
        };

        Ok(Self {
            bind_addr,
            database_url: get("REPORT_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            data_dir: PathBuf::from(get("REPORT_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            cors_origin,
            max_upload_bytes,
        })
    }

    /// Where uploaded evidence files live
    pub fn files_dir(&self) -> PathBuf {
        self.data_dir.join("files")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cors_origin: CorsOrigin::Exact(DEFAULT_CORS_ORIGIN.to_string()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.files_dir(), PathBuf::from("./data/files"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("REPORT_BIND_ADDR", "0.0.0.0:9000"),
            ("REPORT_DATABASE_URL", "sqlite::memory:"),
            ("REPORT_DATA_DIR", "/var/lib/report"),
            ("REPORT_CORS_ORIGIN", "*"),
            ("REPORT_MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.files_dir(), PathBuf::from("/var/lib/report/files"));
        assert_eq!(config.cors_origin, CorsOrigin::Any);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("REPORT_CORS_ORIGIN", "  ")]).unwrap();
        assert_eq!(config.cors_origin, CorsOrigin::Exact(DEFAULT_CORS_ORIGIN.to_string()));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("REPORT_BIND_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("REPORT_MAX_UPLOAD_BYTES", "lots")]).is_err());
    }
}
