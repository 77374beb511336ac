//! Static fallback rates.
//!
//! A point-in-time snapshot used only when the live rate source cannot be
//! reached. These values are stale by construction and any result derived
//! from them must be flagged as approximate to the user.

use crate::CurrencyCode;

/// Date the fallback snapshot was taken (ISO 8601).
pub const FALLBACK_SNAPSHOT_DATE: &str = "2026-02-05";

/// `(from, to, rate)` triples: units of `to` per one unit of `from`.
pub const FALLBACK_RATES: &[(CurrencyCode, CurrencyCode, f64)] = &[
    (CurrencyCode::USD, CurrencyCode::KRW, 1448.0),
    (CurrencyCode::EUR, CurrencyCode::KRW, 1580.0),
    (CurrencyCode::JPY, CurrencyCode::KRW, 9.8),
    (CurrencyCode::CNY, CurrencyCode::KRW, 200.0),
    (CurrencyCode::GBP, CurrencyCode::KRW, 1820.0),
];

/// Returns the snapshot rate for `from -> to`, or `1.0` when the pair is not
/// in the table. Pairs are directional: no inverse is derived.
pub fn fallback_rate(from: CurrencyCode, to: CurrencyCode) -> f64 {
    FALLBACK_RATES
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rate)| *rate)
        .unwrap_or(1.0)
}

/// Whether the snapshot carries an explicit rate for `from -> to`.
pub fn has_fallback_rate(from: CurrencyCode, to: CurrencyCode) -> bool {
    FALLBACK_RATES
        .iter()
        .any(|(f, t, _)| *f == from && *t == to)
}
