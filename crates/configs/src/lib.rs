use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::error;

/// Connection string variable set by the hosting platform.
pub const PRIMARY_URL_VAR: &str = "POSTGRESQL_ADDON_URI";
/// Fallback connection string variable for local runs and tests.
pub const FALLBACK_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Local development server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve from process memory instead of PostgreSQL.
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), in_memory: false }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
    pub sqlx_logging: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8081 }
fn default_connect_timeout() -> u64 { 10 }

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl ServerConfig {
    /// From `config.toml` (or `CONFIG_PATH`) when present, otherwise
    /// `SERVER_HOST`/`SERVER_PORT`/`SERVER_IN_MEMORY`.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&path, |k| std::env::var(k).ok())
    }

    /// Only a missing file falls back to `lookup`; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_from(path: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match load_from_file(path) {
            Ok(cfg) => Ok(cfg.server),
            Err(e) if is_not_found(&e) => Ok(Self::from_lookup(lookup)),
            Err(e) => {
                error!(event = "config_invalid", %path, error = %e, "cannot load server config");
                Err(e.context(format!("invalid config file {path}")))
            }
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("SERVER_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("SERVER_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(defaults.port);
        let in_memory = lookup("SERVER_IN_MEMORY").map(|v| is_truthy(&v)).unwrap_or(defaults.in_memory);
        Self { host, port, in_memory }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Read the connection settings from the process environment.
    /// Called once per invocation so a rotated secret is picked up without a cold start.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(PRIMARY_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .or_else(|| lookup(FALLBACK_URL_VAR))
            .unwrap_or_default();
        let connect_timeout_secs = match lookup("DB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow!("DB_CONNECT_TIMEOUT_SECS is not a number: {e}"))?,
            None => default_connect_timeout(),
        };
        let sqlx_logging = lookup("DB_SQLX_LOGGING").map(|v| is_truthy(&v)).unwrap_or(false);
        let cfg = Self { url, connect_timeout_secs, sqlx_logging };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database url is empty; set {PRIMARY_URL_VAR} or {FALLBACK_URL_VAR}"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database url must start with postgresql:// or postgres://"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("database connect timeout must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
