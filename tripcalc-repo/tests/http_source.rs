//! Integration tests for the HTTP rate source against a local stub server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use exchange_rates::CurrencyCode;
use serde_json::json;
use tokio::net::TcpListener;
use tripcalc_repo::{CachingRateProvider, ErApiSource};
use tripcalc_types::{RateProvider, RateSource, RateSourceError};

/// Stub upstream: USD succeeds, EUR reports an API error, anything else is a 500.
async fn latest(State(hits): State<Arc<AtomicUsize>>, Path(base): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    match base.as_str() {
        "USD" => Json(json!({
            "result": "success",
            "base_code": "USD",
            "time_last_update_utc": "Thu, 05 Feb 2026 00:02:31 +0000",
            "rates": { "USD": 1, "KRW": 1400.5, "EUR": 0.92 }
        }))
        .into_response(),
        "EUR" => Json(json!({ "result": "error", "error-type": "quota-reached" })).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Helper to start the stub server and return its base URL and hit counter.
async fn start_stub() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v6/latest/{base}", get(latest))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v6/latest"), hits)
}

#[tokio::test]
async fn test_fetch_table_success() {
    let (url, _) = start_stub().await;
    let source = ErApiSource::new(url);

    let table = source.fetch_table(CurrencyCode::USD).await.unwrap();

    assert_eq!(table.rate_for(CurrencyCode::KRW), Some(1400.5));
    assert_eq!(
        table.last_updated,
        chrono::NaiveDate::from_ymd_opt(2026, 2, 5)
    );
}

#[tokio::test]
async fn test_fetch_table_api_error_on_200() {
    let (url, _) = start_stub().await;
    let source = ErApiSource::new(url);

    let err = source.fetch_table(CurrencyCode::EUR).await.unwrap_err();

    assert!(matches!(err, RateSourceError::Api(t) if t == "quota-reached"));
}

#[tokio::test]
async fn test_fetch_table_http_status() {
    let (url, _) = start_stub().await;
    let source = ErApiSource::new(url);

    let err = source.fetch_table(CurrencyCode::JPY).await.unwrap_err();

    assert!(matches!(err, RateSourceError::Status(500)));
}

#[tokio::test]
async fn test_fetch_table_unreachable() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = ErApiSource::new(format!("http://{addr}/v6/latest"));
    let err = source.fetch_table(CurrencyCode::USD).await.unwrap_err();

    assert!(matches!(err, RateSourceError::Transport(_)));
}

#[tokio::test]
async fn test_provider_caches_live_rates_over_http() {
    let (url, hits) = start_stub().await;
    let provider = CachingRateProvider::new(ErApiSource::new(url));

    let first = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;
    let second = provider.get_rate(CurrencyCode::USD, CurrencyCode::KRW).await;

    assert_eq!(first.rate, 1400.5);
    assert!(!first.is_fallback);
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_falls_back_over_http() {
    let (url, hits) = start_stub().await;
    let provider = CachingRateProvider::new(ErApiSource::new(url));

    let first = provider.get_rate(CurrencyCode::EUR, CurrencyCode::KRW).await;
    let second = provider.get_rate(CurrencyCode::EUR, CurrencyCode::KRW).await;

    assert!(first.is_fallback);
    assert_eq!(first.rate, 1580.0);
    assert!(second.is_fallback);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
