//! Exchange rate values.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use exchange_rates::{CurrencyCode, fallback_rate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RateSourceError;

/// A directional currency pair. `USD -> KRW` and `KRW -> USD` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct RateQuery {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl RateQuery {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    /// Cache key in `FROM_TO` form.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.from, self.to)
    }
}

impl fmt::Display for RateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.from, self.to)
    }
}

/// A best-effort exchange rate.
///
/// `rate` is always positive. When `is_fallback` is set the rate came from the
/// static snapshot and callers must surface a degraded-data warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateResult {
    pub base: CurrencyCode,
    pub quote_currency: CurrencyCode,
    /// Units of `quote_currency` per one unit of `base`
    #[schema(example = 1448.0)]
    pub rate: f64,
    pub as_of_date: NaiveDate,
    pub is_fallback: bool,
}

impl RateResult {
    /// Builds a live result, rejecting zero, negative and non-finite rates.
    pub fn live(
        query: RateQuery,
        rate: f64,
        as_of_date: NaiveDate,
    ) -> Result<Self, RateSourceError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateSourceError::MissingRate {
                base: query.from.to_string(),
                quote: query.to,
            });
        }
        Ok(Self {
            base: query.from,
            quote_currency: query.to,
            rate,
            as_of_date,
            is_fallback: false,
        })
    }

    /// Builds a result from the static fallback snapshot.
    pub fn fallback(query: RateQuery, as_of_date: NaiveDate) -> Self {
        Self {
            base: query.from,
            quote_currency: query.to,
            rate: fallback_rate(query.from, query.to),
            as_of_date,
            is_fallback: true,
        }
    }

    pub fn query(&self) -> RateQuery {
        RateQuery::new(self.base, self.quote_currency)
    }
}

/// A full rate table as returned by the remote source.
///
/// Codes stay as open strings here: the source may list currencies this
/// system does not support.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
    /// Date of the source's last update, when it reported one.
    pub last_updated: Option<NaiveDate>,
}

impl RateTable {
    /// Looks up the rate for a supported currency.
    pub fn rate_for(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(code.code()).copied()
    }

    /// Extracts a live [`RateResult`] for `query`, dating it `today` when the
    /// table carries no update timestamp.
    pub fn extract(&self, query: RateQuery, today: NaiveDate) -> Result<RateResult, RateSourceError> {
        let rate = self
            .rate_for(query.to)
            .ok_or_else(|| RateSourceError::MissingRate {
                base: self.base.clone(),
                quote: query.to,
            })?;
        RateResult::live(query, rate, self.last_updated.unwrap_or(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(rates: &[(&str, f64)], last_updated: Option<NaiveDate>) -> RateTable {
        RateTable {
            base: "USD".to_string(),
            rates: rates.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
            last_updated,
        }
    }

    #[test]
    fn test_cache_key_is_directional() {
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        assert_eq!(q.cache_key(), "USD_KRW");
        assert_ne!(
            q.cache_key(),
            RateQuery::new(CurrencyCode::KRW, CurrencyCode::USD).cache_key()
        );
    }

    #[test]
    fn test_live_rejects_non_positive() {
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        assert!(RateResult::live(q, 0.0, date(2026, 1, 1)).is_err());
        assert!(RateResult::live(q, -3.0, date(2026, 1, 1)).is_err());
        assert!(RateResult::live(q, f64::NAN, date(2026, 1, 1)).is_err());
    }

    #[test]
    fn test_fallback_uses_snapshot() {
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        let result = RateResult::fallback(q, date(2026, 3, 1));
        assert_eq!(result.rate, 1448.0);
        assert!(result.is_fallback);
        assert_eq!(result.query(), q);
    }

    #[test]
    fn test_fallback_unknown_pair_is_one() {
        let q = RateQuery::new(CurrencyCode::EUR, CurrencyCode::USD);
        assert_eq!(RateResult::fallback(q, date(2026, 3, 1)).rate, 1.0);
    }

    #[test]
    fn test_extract_uses_table_date() {
        let t = table(&[("KRW", 1400.0)], Some(date(2026, 2, 1)));
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        let result = t.extract(q, date(2026, 2, 3)).unwrap();
        assert_eq!(result.rate, 1400.0);
        assert_eq!(result.as_of_date, date(2026, 2, 1));
        assert!(!result.is_fallback);
    }

    #[test]
    fn test_extract_defaults_to_today() {
        let t = table(&[("KRW", 1400.0)], None);
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        assert_eq!(t.extract(q, date(2026, 2, 3)).unwrap().as_of_date, date(2026, 2, 3));
    }

    #[test]
    fn test_extract_missing_quote() {
        let t = table(&[("EUR", 0.9)], None);
        let q = RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW);
        let err = t.extract(q, date(2026, 2, 3)).unwrap_err();
        assert!(matches!(err, RateSourceError::MissingRate { quote: CurrencyCode::KRW, .. }));
    }
}
