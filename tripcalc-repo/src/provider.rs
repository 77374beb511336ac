//! Caching rate provider with static fallback.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use exchange_rates::{CurrencyCode, FALLBACK_SNAPSHOT_DATE, has_fallback_rate};
use tracing::{info, warn};

use tripcalc_types::{RateProvider, RateQuery, RateResult, RateSource, RateSourceError};

use crate::cache::RateCache;

/// Rate provider that serves fresh cached rates, fetches on a miss, and
/// substitutes the fallback snapshot when the source fails.
///
/// Fallback results are never cached, so every call after a failure retries
/// the source. Concurrent misses for the same pair may each hit the source.
pub struct CachingRateProvider<S: RateSource> {
    source: S,
    cache: RateCache,
}

impl<S: RateSource> CachingRateProvider<S> {
    /// Creates a provider with the default one-hour freshness window.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RateCache::default(),
        }
    }

    /// Creates a provider with a custom freshness window.
    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            cache: RateCache::new(ttl),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    async fn fetch_live(&self, query: RateQuery) -> Result<RateResult, RateSourceError> {
        let table = self.source.fetch_table(query.from).await?;
        table.extract(query, Utc::now().date_naive())
    }
}

#[async_trait]
impl<S: RateSource> RateProvider for CachingRateProvider<S> {
    #[tracing::instrument(skip(self))]
    async fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> RateResult {
        let query = RateQuery::new(from, to);

        if let Some(cached) = self.cache.get(&query) {
            return cached;
        }

        match self.fetch_live(query).await {
            Ok(result) => {
                info!(pair = %query, rate = result.rate, "Fetched live exchange rate");
                self.cache.insert(result.clone());
                result
            }
            Err(e) => {
                let result = RateResult::fallback(query, Utc::now().date_naive());
                warn!(
                    pair = %query,
                    error = %e,
                    fallback_rate = result.rate,
                    in_snapshot = has_fallback_rate(from, to),
                    snapshot_date = FALLBACK_SNAPSHOT_DATE,
                    "Live exchange rate unavailable, using fallback"
                );
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use tripcalc_types::RateTable;

    use super::*;

    /// Source that replays queued responses, then fails with a transport error.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<RateTable, RateSourceError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<RateTable, RateSourceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self::new(Vec::new())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        async fn fetch_table(&self, _base: CurrencyCode) -> Result<RateTable, RateSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RateSourceError::Transport("connection refused".into())))
        }
    }

    fn usd_table(krw: f64) -> RateTable {
        RateTable {
            base: "USD".to_string(),
            rates: [("USD".to_string(), 1.0), ("KRW".to_string(), krw)]
                .into_iter()
                .collect(),
            last_updated: NaiveDate::from_ymd_opt(2026, 2, 5),
        }
    }

    #[tokio::test]
    async fn test_live_rate_is_cached() {
        let provider = CachingRateProvider::new(ScriptedSource::new(vec![Ok(usd_table(1400.0))]));

        let first = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        let second = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;

        assert_eq!(first.rate, 1400.0);
        assert!(!first.is_fallback);
        assert_eq!(first, second);
        assert_eq!(provider.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched() {
        let provider = CachingRateProvider::with_ttl(
            ScriptedSource::new(vec![Ok(usd_table(1400.0)), Ok(usd_table(1410.0))]),
            Duration::zero(),
        );

        let first = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        let second = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;

        assert_eq!(first.rate, 1400.0);
        assert_eq!(second.rate, 1410.0);
        assert_eq!(provider.source().calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_falls_back_without_caching() {
        let provider = CachingRateProvider::new(ScriptedSource::failing());

        let result = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        assert_eq!(result.rate, 1448.0);
        assert!(result.is_fallback);
        assert!(provider.cache().is_empty());

        let again = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        assert!(again.is_fallback);
        assert_eq!(provider.source().calls(), 2);
    }

    #[tokio::test]
    async fn test_recovers_after_failure() {
        let provider = CachingRateProvider::new(ScriptedSource::new(vec![
            Err(RateSourceError::Status(503)),
            Ok(usd_table(1400.0)),
        ]));

        assert!(provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await.is_fallback);
        let live = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        assert!(!live.is_fallback);
        assert_eq!(live.rate, 1400.0);
        assert_eq!(provider.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_api_error_falls_back() {
        let provider = CachingRateProvider::new(ScriptedSource::new(vec![Err(
            RateSourceError::Api("invalid-key".into()),
        )]));
        let result = provider.get_rate(CurrencyCode::EUR, CurrencyCode::KRW).await;
        assert!(result.is_fallback);
        assert_eq!(result.rate, 1580.0);
    }

    #[tokio::test]
    async fn test_missing_quote_falls_back() {
        let provider = CachingRateProvider::new(ScriptedSource::new(vec![Ok(usd_table(1400.0))]));
        let result = provider.get_rate(CurrencyCode::USD, CurrencyCode::GBP).await;
        assert!(result.is_fallback);
        assert_eq!(result.rate, 1.0);
        assert!(provider.cache().is_empty());
    }

    #[tokio::test]
    async fn test_zero_rate_falls_back() {
        let provider = CachingRateProvider::new(ScriptedSource::new(vec![Ok(usd_table(0.0))]));
        let result = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
        assert!(result.is_fallback);
        assert_eq!(result.rate, 1448.0);
    }
}
