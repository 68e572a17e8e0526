//! Environment-driven server configuration.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite:expenses.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Single origin allowed by CORS
    pub cors_origin: String,
    pub request_timeout: Duration,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Read `EXPENSE_REPORT_*` variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = read("EXPENSE_REPORT_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("EXPENSE_REPORT_BIND_ADDR `{}` is not a socket address", bind_addr))?;

        let timeout = read(
            "EXPENSE_REPORT_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        );
        let timeout_secs = timeout.trim().parse::<u64>().with_context(|| {
            format!("EXPENSE_REPORT_REQUEST_TIMEOUT_SECS `{}` is not a number of seconds", timeout)
        })?;

        Ok(Self {
            database_url: read("EXPENSE_REPORT_DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr,
            cors_origin: read("EXPENSE_REPORT_CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: read("EXPENSE_REPORT_LOG", DEFAULT_LOG_LEVEL),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("EXPENSE_REPORT_DATABASE_URL", "sqlite::memory:"),
            ("EXPENSE_REPORT_BIND_ADDR", "0.0.0.0:8080"),
            ("EXPENSE_REPORT_REQUEST_TIMEOUT_SECS", "5"),
            ("EXPENSE_REPORT_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
    }

    #[test]
    fn test_malformed_values_fail() {
        let err = Config::from_lookup(lookup(&[("EXPENSE_REPORT_BIND_ADDR", "localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains("EXPENSE_REPORT_BIND_ADDR"));

        assert!(
            Config::from_lookup(lookup(&[("EXPENSE_REPORT_REQUEST_TIMEOUT_SECS", "soon")])).is_err()
        );
    }
}
