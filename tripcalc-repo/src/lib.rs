//! # Tripcalc Repository
//!
//! Outbound adapters for the trip calculator:
//! - `http_source` - ExchangeRate-API client implementing `RateSource`
//! - `provider` - caching `RateProvider` with static fallback
//! - `memory` / `sqlite` - `HistoryStore` implementations

use async_trait::async_trait;
use chrono::Duration;

use tripcalc_types::{HistoryEntry, HistoryError, HistoryStore};

pub mod cache;
pub mod http_source;
pub mod memory;
pub mod provider;
#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use cache::{DEFAULT_RATE_TTL_MILLIS, RateCache};
pub use http_source::{DEFAULT_RATES_API_URL, ErApiSource};
pub use memory::InMemoryHistory;
pub use provider::CachingRateProvider;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteHistory;

/// Builds the production rate provider for an ExchangeRate-API endpoint.
pub fn build_rate_provider(base_url: &str, ttl: Duration) -> CachingRateProvider<ErApiSource> {
    CachingRateProvider::with_ttl(ErApiSource::new(base_url), ttl)
}

/// Unified history store selected at startup.
pub enum History {
    Memory(InMemoryHistory),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteHistory),
}

/// Build a history store.
///
/// Without a database URL the history lives in memory. With one, it is
/// persisted in SQLite (requires the `sqlite` feature).
///
/// # Examples
///
/// ```ignore
/// let history = build_history(None).await?;
/// let history = build_history(Some("sqlite://data/history.db?mode=rwc")).await?;
/// ```
pub async fn build_history(database_url: Option<&str>) -> anyhow::Result<History> {
    match database_url {
        None => Ok(History::Memory(InMemoryHistory::new())),
        #[cfg(feature = "sqlite")]
        Some(url) => Ok(History::Sqlite(SqliteHistory::new(url).await?)),
        #[cfg(not(feature = "sqlite"))]
        Some(url) => anyhow::bail!(
            "History database {} requested but the `sqlite` feature is disabled",
            url
        ),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement HistoryStore for History (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryStore for History {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        match self {
            History::Memory(inner) => inner.append(entry).await,
            #[cfg(feature = "sqlite")]
            History::Sqlite(inner) => inner.append(entry).await,
        }
    }

    async fn load_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self {
            History::Memory(inner) => inner.load_all().await,
            #[cfg(feature = "sqlite")]
            History::Sqlite(inner) => inner.load_all().await,
        }
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        match self {
            History::Memory(inner) => inner.clear().await,
            #[cfg(feature = "sqlite")]
            History::Sqlite(inner) => inner.clear().await,
        }
    }
}
