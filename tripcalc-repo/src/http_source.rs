//! HTTP rate source for ExchangeRate-API style endpoints.
//!
//! `GET {base_url}/{BASE}` returns the whole table anchored at `BASE`:
//!
//! ```json
//! {
//!   "result": "success",
//!   "base_code": "USD",
//!   "time_last_update_utc": "Thu, 05 Feb 2026 00:02:31 +0000",
//!   "rates": { "USD": 1, "KRW": 1448.12, "...": 0.0 }
//! }
//! ```
//!
//! A `"result": "error"` body is a failure even when the status is 200.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use exchange_rates::CurrencyCode;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use tripcalc_types::{RateSource, RateSourceError, RateTable};

/// Public endpoint used when no base URL is configured.
pub const DEFAULT_RATES_API_URL: &str = "https://open.er-api.com/v6/latest";

const ERROR_SENTINEL: &str = "error";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    rates: Option<HashMap<String, f64>>,
    time_last_update_utc: Option<String>,
    time_last_update_unix: Option<i64>,
}

/// Rate source backed by an ExchangeRate-API compatible HTTP endpoint.
pub struct ErApiSource {
    base_url: String,
    http: Client,
}

impl ErApiSource {
    /// Creates a source for the given endpoint base.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ErApiSource {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_API_URL)
    }
}

#[async_trait]
impl RateSource for ErApiSource {
    async fn fetch_table(&self, base: CurrencyCode) -> Result<RateTable, RateSourceError> {
        let url = format!("{}/{}", self.base_url, base.code());
        debug!(%url, "Fetching rate table");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RateSourceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RateSourceError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RateSourceError::Transport(e.to_string()))?;
        parse_latest(&body, base)
    }
}

/// Parses a `latest` response body into a [`RateTable`].
pub fn parse_latest(body: &str, base: CurrencyCode) -> Result<RateTable, RateSourceError> {
    let parsed: LatestResponse =
        serde_json::from_str(body).map_err(|e| RateSourceError::Parse(e.to_string()))?;

    if parsed.result.as_deref() == Some(ERROR_SENTINEL) {
        return Err(RateSourceError::Api(
            parsed.error_type.unwrap_or_else(|| "unknown".to_string()),
        ));
    }

    let rates = parsed
        .rates
        .ok_or_else(|| RateSourceError::Parse("missing `rates` field".to_string()))?;

    Ok(RateTable {
        base: parsed.base_code.unwrap_or_else(|| base.code().to_string()),
        rates,
        last_updated: last_update_date(
            parsed.time_last_update_utc.as_deref(),
            parsed.time_last_update_unix,
        ),
    })
}

fn last_update_date(utc: Option<&str>, unix: Option<i64>) -> Option<NaiveDate> {
    utc.and_then(|s| DateTime::parse_from_rfc2822(s).ok())
        .map(|dt| dt.date_naive())
        .or_else(|| {
            unix.and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.date_naive())
        })
}
