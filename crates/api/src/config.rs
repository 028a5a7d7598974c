use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};

/// Default `RUST_LOG`-style filter when the environment sets none.
pub const DEFAULT_LOG_FILTER: &str = "sesiones_api=debug,sesiones_db=debug,tower_http=debug";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{other}'"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Postgres connection URL.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bound on each persistence call in seconds (default: `10`).
    pub db_call_timeout_secs: u64,
    /// Connection pool size (default: `10`).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                        |
    /// |------------------------|------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                      |
    /// | `PORT`                 | `8000`                                         |
    /// | `DATABASE_URL`         | (required)                                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://127.0.0.1:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                           |
    /// | `DB_CALL_TIMEOUT_SECS` | `10`                                           |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                           |
    /// | `LOG_FORMAT`           | `pretty`                                       |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "8000")
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000,http://127.0.0.1:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let db_call_timeout_secs: u64 = var("DB_CALL_TIMEOUT_SECS", "10")
            .parse()
            .context("DB_CALL_TIMEOUT_SECS must be a valid u64")?;

        let db_max_connections: u32 = var("DB_MAX_CONNECTIONS", "10")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?;

        let log_format: LogFormat = var("LOG_FORMAT", "pretty").parse()?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            db_call_timeout_secs,
            db_max_connections,
            log_format,
        })
    }

    pub fn db_call_timeout(&self) -> Duration {
        Duration::from_secs(self.db_call_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/sesiones")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.db_call_timeout(), Duration::from_secs(10));
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn missing_database_url_fails() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_fails_with_name() {
        let err = load(&[("DATABASE_URL", "x"), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn cors_origins_are_trimmed_and_blank_entries_dropped() {
        let config = load(&[
            ("DATABASE_URL", "x"),
            ("CORS_ORIGINS", " http://a.test , ,http://b.test"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn log_format_parses_json() {
        let config = load(&[("DATABASE_URL", "x"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
