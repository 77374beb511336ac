//! Exchange rate ports.
//!
//! `RateSource` is the raw outbound fetch (HTTP clients, canned tables in
//! tests). `RateProvider` is what the calculators consume: a total lookup that
//! always yields a rate, flagging degraded data instead of failing.

use exchange_rates::CurrencyCode;

use crate::domain::{RateResult, RateTable};
use crate::error::RateSourceError;

/// Port trait for remote rate tables.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the full rate table anchored at `base`.
    async fn fetch_table(&self, base: CurrencyCode) -> Result<RateTable, RateSourceError>;
}

/// Port trait for best-effort single-pair rates.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Returns how many units of `to` one unit of `from` buys.
    ///
    /// Never fails: when no live rate can be obtained the result carries a
    /// fallback rate with `is_fallback` set.
    async fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> RateResult;
}
