//! Configuration loading from environment.

use std::env;

use chrono::Duration;
use tripcalc_repo::{DEFAULT_RATE_TTL_MILLIS, DEFAULT_RATES_API_URL};

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// ExchangeRate-API "latest" endpoint; the base code is appended
    pub rates_api_url: String,
    pub rate_cache_ttl: Duration,
    /// SQLite URL for persistent history; in-memory history when absent
    pub history_database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let rates_api_url =
            lookup("RATES_API_URL").unwrap_or_else(|| DEFAULT_RATES_API_URL.to_string());

        let rate_cache_ttl = match lookup("RATE_CACHE_TTL_SECS") {
            Some(raw) => {
                let secs: i64 = raw
                    .parse()
                    .map_err(|e| anyhow::anyhow!("RATE_CACHE_TTL_SECS must be an integer: {e}"))?;
                if secs < 1 {
                    anyhow::bail!("RATE_CACHE_TTL_SECS must be at least 1, got {secs}");
                }
                Duration::try_seconds(secs)
                    .ok_or_else(|| anyhow::anyhow!("RATE_CACHE_TTL_SECS out of range: {secs}"))?
            }
            None => Duration::milliseconds(DEFAULT_RATE_TTL_MILLIS),
        };

        let history_database_url = lookup("HISTORY_DATABASE_URL").filter(|url| !url.is_empty());

        Ok(Self {
            port,
            rates_api_url,
            rate_cache_ttl,
            history_database_url,
        })
    }
}
