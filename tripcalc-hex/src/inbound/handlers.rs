//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use tripcalc_types::{
    AppError, CurrencyCode, CustomsRequest, ExchangeRequest, HistoryStore, RateProvider,
    TipRequest,
};

use crate::CalculatorService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider, H: HistoryStore> {
    pub service: CalculatorService<P, H>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_currency(raw: &str) -> Result<CurrencyCode, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unsupported currency: {}", raw)))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Machine-readable API description.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculators
// ─────────────────────────────────────────────────────────────────────────────

/// Convert an amount between currencies.
#[tracing::instrument(skip(state), fields(from = %req.from, to = %req.to))]
pub async fn exchange<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    Json(req): Json<ExchangeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let calc = state.service.compute_exchange(req).await?;
    Ok(Json(calc))
}

/// Estimate duty and VAT on an overseas order.
#[tracing::instrument(skip(state), fields(category = %req.category))]
pub async fn customs<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    Json(req): Json<CustomsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let calc = state.service.compute_customs(req).await?;
    Ok(Json(calc))
}

/// Compute a tip and split the bill.
#[tracing::instrument(skip(state), fields(country = %req.country_code))]
pub async fn tip<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    Json(req): Json<TipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let calc = state.service.compute_tip(req).await?;
    Ok(Json(calc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference Data
// ─────────────────────────────────────────────────────────────────────────────

/// List supported currencies.
pub async fn currencies<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> impl IntoResponse {
    Json(state.service.currencies())
}

/// Current rate for a currency pair.
#[tracing::instrument(skip(state))]
pub async fn rate<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    Path((from, to)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let from = parse_currency(&from)?;
    let to = parse_currency(&to)?;

    let rate = state.service.get_rate(from, to).await;
    Ok(Json(rate))
}

/// List all tipping cultures.
pub async fn tip_cultures<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> impl IntoResponse {
    Json(state.service.tip_cultures())
}

/// Tipping conventions for one country.
#[tracing::instrument(skip(state))]
pub async fn tip_culture<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
    Path(country): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let culture = state.service.tip_defaults(&country)?;
    Ok(Json(culture))
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// Recent calculations, most recent first.
#[tracing::instrument(skip(state))]
pub async fn history<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.service.history().await?;
    Ok(Json(entries))
}

/// Forget all recorded calculations.
#[tracing::instrument(skip(state))]
pub async fn clear_history<P: RateProvider, H: HistoryStore>(
    State(state): State<Arc<AppState<P, H>>>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.clear_history().await?;
    Ok(StatusCode::NO_CONTENT)
}
