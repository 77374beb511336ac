//! Client SDK against a live server on an ephemeral port.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::net::TcpListener;

use tripcalc_client::{ClientError, TripcalcClient};
use tripcalc_hex::{CalculatorService, inbound::HttpServer};
use tripcalc_repo::InMemoryHistory;
use tripcalc_types::{CurrencyCode, HistoryKind, RateProvider, RateQuery, RateResult};

/// Every pair is served from the fallback snapshot.
struct SnapshotRates;

#[async_trait]
impl RateProvider for SnapshotRates {
    async fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> RateResult {
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        RateResult::fallback(RateQuery::new(from, to), as_of)
    }
}

async fn start_server() -> TripcalcClient {
    let service = CalculatorService::new(SnapshotRates, InMemoryHistory::new());
    let app = HttpServer::new(service).router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TripcalcClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn test_health() {
    let client = start_server().await;
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn test_calculators_and_history() {
    let client = start_server().await;

    let exchange = client
        .exchange(100.0, CurrencyCode::USD, CurrencyCode::KRW)
        .await
        .unwrap();
    assert!(exchange.is_fallback);
    assert_eq!(exchange.converted_amount, 144_800.0);

    let customs = client.customs(120.0, Some(10.0), "shoes").await.unwrap();
    assert!(customs.is_duty_free);

    let tip = client.tip(100.0, None, 2, "USA").await.unwrap();
    assert_eq!(tip.tip_percent, 15.0);
    assert_eq!(tip.per_person_amount, 57.5);

    let history = client.history().await.unwrap();
    let kinds: Vec<_> = history.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![HistoryKind::Tip, HistoryKind::Customs, HistoryKind::Exchange]
    );

    client.clear_history().await.unwrap();
    assert!(client.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reference_data() {
    let client = start_server().await;

    assert_eq!(client.currencies().await.unwrap().len(), 7);
    assert_eq!(client.tip_cultures().await.unwrap().len(), 6);

    let jpn = client.tip_culture("JPN").await.unwrap();
    assert_eq!(jpn.default_tip_percent, 0.0);

    let rate = client.rate(CurrencyCode::EUR, CurrencyCode::KRW).await.unwrap();
    assert_eq!(rate.rate, 1580.0);
}

#[tokio::test]
async fn test_api_error_carries_message() {
    let client = start_server().await;

    let err = client
        .tip(100.0, Some(15.0), 0, "USA")
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("Party size"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}
