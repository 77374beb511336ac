//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use tripcalc_types::domain::{
    CountryCode, CustomsCalculation, ExchangeCalculation, HistoryEntry, HistoryKind, RateResult,
    TipCalculation,
};
use tripcalc_types::dto::{
    CurrencyInfo, CustomsRequest, ExchangeRequest, TipCultureResponse, TipRequest,
};
use tripcalc_types::CurrencyCode;
use utoipa::OpenApi;

// Stand-ins for the generic handlers, used only for path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between currencies
#[utoipa::path(
    post,
    path = "/api/exchange",
    tag = "calculators",
    request_body = ExchangeRequest,
    responses(
        (status = 200, description = "Conversion result", body = ExchangeCalculation),
        (status = 400, description = "Missing, non-positive or overflowing amount")
    )
)]
async fn exchange() {}

/// Estimate import duty and VAT on a USD-priced order
#[utoipa::path(
    post,
    path = "/api/customs",
    tag = "calculators",
    request_body = CustomsRequest,
    responses(
        (status = 200, description = "Duty and VAT breakdown", body = CustomsCalculation),
        (status = 400, description = "Missing, non-positive or overflowing product price")
    )
)]
async fn customs() {}

/// Compute a tip and per-person share
#[utoipa::path(
    post,
    path = "/api/tip",
    tag = "calculators",
    request_body = TipRequest,
    responses(
        (status = 200, description = "Tip breakdown", body = TipCalculation),
        (status = 400, description = "Invalid amount, tip, party size or country")
    )
)]
async fn tip() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "reference",
    responses(
        (status = 200, description = "Supported currencies", body = Vec<CurrencyInfo>)
    )
)]
async fn currencies() {}

/// Current rate for a currency pair (falls back to a static snapshot)
#[utoipa::path(
    get,
    path = "/api/rates/{from}/{to}",
    tag = "reference",
    params(
        ("from" = CurrencyCode, Path, description = "Base currency"),
        ("to" = CurrencyCode, Path, description = "Quote currency")
    ),
    responses(
        (status = 200, description = "Rate and its provenance", body = RateResult),
        (status = 400, description = "Unsupported currency")
    )
)]
async fn rate() {}

/// List tipping cultures
#[utoipa::path(
    get,
    path = "/api/tip/cultures",
    tag = "reference",
    responses(
        (status = 200, description = "All tipping cultures", body = Vec<TipCultureResponse>)
    )
)]
async fn tip_cultures() {}

/// Tipping conventions for one country
#[utoipa::path(
    get,
    path = "/api/tip/cultures/{country}",
    tag = "reference",
    params(
        ("country" = CountryCode, Path, description = "Country code")
    ),
    responses(
        (status = 200, description = "Tipping culture", body = TipCultureResponse),
        (status = 404, description = "Unknown country")
    )
)]
async fn tip_culture() {}

/// Recent calculations, most recent first
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 200, description = "Up to ten history entries", body = Vec<HistoryEntry>),
        (status = 500, description = "History storage failure")
    )
)]
async fn history() {}

/// Forget all recorded calculations
#[utoipa::path(
    delete,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 204, description = "History cleared"),
        (status = 500, description = "History storage failure")
    )
)]
async fn clear_history() {}

/// OpenAPI documentation for the trip calculator API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trip Calculator API",
        version = "1.0.0",
        description = "Currency exchange, overseas-purchase customs and restaurant tip calculators for travellers.\n\nRates come from a public exchange-rate API and are cached for an hour. When the API is unavailable a static snapshot is used and results carry `is_fallback: true`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        exchange,
        customs,
        tip,
        currencies,
        rate,
        tip_cultures,
        tip_culture,
        history,
        clear_history,
    ),
    components(
        schemas(
            ExchangeRequest,
            CustomsRequest,
            TipRequest,
            ExchangeCalculation,
            CustomsCalculation,
            TipCalculation,
            RateResult,
            CurrencyInfo,
            TipCultureResponse,
            HistoryEntry,
            HistoryKind,
            CurrencyCode,
            CountryCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "calculators", description = "Exchange, customs and tip calculations"),
        (name = "reference", description = "Currencies, rates and tipping cultures"),
        (name = "history", description = "Recent calculation history"),
    )
)]
pub struct ApiDoc;
