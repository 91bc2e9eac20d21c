//! Application state and configuration.

use std::sync::Arc;
use std::time::Duration;

use clickhouse::Client;

use crate::cache::{self, ResponseCache};

/// Application configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// ClickHouse connection URL.
    pub clickhouse_url: String,

    /// ClickHouse database name.
    pub clickhouse_database: String,

    /// How long catalog lookups stay cached.
    pub catalog_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `RANKWISE_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `CLICKHOUSE_URL`: ClickHouse URL (default: "http://localhost:8123")
    /// - `CLICKHOUSE_DATABASE`: Database name (default: "admissions")
    /// - `RANKWISE_CATALOG_TTL_SECS`: Catalog cache TTL in seconds (default: 3600)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("RANKWISE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let clickhouse_url =
            std::env::var("CLICKHOUSE_URL").unwrap_or_else(|_| "http://localhost:8123".to_string());

        let clickhouse_database =
            std::env::var("CLICKHOUSE_DATABASE").unwrap_or_else(|_| "admissions".to_string());

        let catalog_ttl = match std::env::var("RANKWISE_CATALOG_TTL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("RANKWISE_CATALOG_TTL_SECS must be a number of seconds, got '{raw}'")
                })?;
                if secs == 0 {
                    anyhow::bail!("RANKWISE_CATALOG_TTL_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            Err(_) => cache::ttl::CATALOG,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            clickhouse_url = %clickhouse_url,
            clickhouse_database = %clickhouse_database,
            catalog_ttl_secs = catalog_ttl.as_secs(),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            clickhouse_url,
            clickhouse_database,
            catalog_ttl,
        })
    }
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// ClickHouse client for database queries.
    pub clickhouse: Client,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Catalog response cache.
    pub cache: ResponseCache,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> Self {
        let clickhouse = Client::default()
            .with_url(&config.clickhouse_url)
            .with_database(&config.clickhouse_database);

        let cache = cache::new_cache(config.catalog_ttl);

        tracing::info!(
            cache_capacity = cache::DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs = config.catalog_ttl.as_secs(),
            "application state initialized"
        );

        Self {
            clickhouse,
            config: Arc::new(config),
            cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "RANKWISE_BIND_ADDR",
        "CLICKHOUSE_URL",
        "CLICKHOUSE_DATABASE",
        "RANKWISE_CATALOG_TTL_SECS",
    ];

    /// Run `f` with only `vars` set among the config keys.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8080");
            assert_eq!(config.clickhouse_url, "http://localhost:8123");
            assert_eq!(config.clickhouse_database, "admissions");
            assert_eq!(config.catalog_ttl, Duration::from_secs(3600));
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("RANKWISE_BIND_ADDR", "127.0.0.1:9090"),
                ("CLICKHOUSE_URL", "http://ch:8123"),
                ("CLICKHOUSE_DATABASE", "scores"),
                ("RANKWISE_CATALOG_TTL_SECS", "120"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.clickhouse_url, "http://ch:8123");
                assert_eq!(config.clickhouse_database, "scores");
                assert_eq!(config.catalog_ttl, Duration::from_secs(120));
            },
        );
    }

    #[test]
    fn config_rejects_zero_ttl() {
        with_env_vars(&[("RANKWISE_CATALOG_TTL_SECS", "0")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn config_rejects_non_numeric_ttl() {
        with_env_vars(&[("RANKWISE_CATALOG_TTL_SECS", "an hour")], || {
            assert!(Config::from_env().is_err());
        });
    }
}
