//! Calculator Application Service
//!
//! Orchestrates the three calculators through the rate and history ports.
//! Contains NO infrastructure logic - validation, rate lookup, arithmetic and
//! history bookkeeping only.

use exchange_rates::CurrencyCode;
use tracing::warn;

use tripcalc_types::domain::customs::{CUSTOMS_BASE_CURRENCY, CUSTOMS_PRICE_CURRENCY};
use tripcalc_types::domain::tipping::{TIPPING_CULTURES, tipping_culture};
use tripcalc_types::{
    AppError, CurrencyInfo, CustomsCalculation, CustomsRequest, ExchangeCalculation,
    ExchangeRequest, HistoryEntry, HistoryStore, RateProvider, RateResult, TipCalculation,
    TipCultureResponse, TipRequest, ValidationError,
};

/// Application service for the exchange, customs and tip calculators.
///
/// Generic over the rate provider and history store - adapters are injected
/// at compile time. The provider is constructed once at startup and owns the
/// rate cache for the life of the service.
pub struct CalculatorService<P: RateProvider, H: HistoryStore> {
    rates: P,
    history: H,
}

impl<P: RateProvider, H: HistoryStore> CalculatorService<P, H> {
    /// Creates a new calculator service.
    pub fn new(rates: P, history: H) -> Self {
        Self { rates, history }
    }

    /// Returns a reference to the underlying rate provider.
    pub fn rates(&self) -> &P {
        &self.rates
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Calculators
    // ─────────────────────────────────────────────────────────────────────────────

    /// Best-effort rate for a currency pair.
    pub async fn get_rate(&self, from: CurrencyCode, to: CurrencyCode) -> RateResult {
        self.rates.get_rate(from, to).await
    }

    /// Converts an amount at the current rate.
    pub async fn compute_exchange(
        &self,
        req: ExchangeRequest,
    ) -> Result<ExchangeCalculation, AppError> {
        let amount = require_positive("amount", req.amount)?;

        let rate = self.rates.get_rate(req.from, req.to).await;
        let calc = ExchangeCalculation::from_rate(amount, &rate);
        calc.ensure_finite()?;

        self.record(calc.history_entry()).await;
        Ok(calc)
    }

    /// Estimates import duty and VAT on a USD-priced order.
    pub async fn compute_customs(
        &self,
        req: CustomsRequest,
    ) -> Result<CustomsCalculation, AppError> {
        let product_price = require_positive("product_price", req.product_price)?;
        let shipping_cost = req
            .shipping_cost
            .filter(|cost| cost.is_finite() && *cost >= 0.0)
            .unwrap_or(0.0);

        let rate = self
            .rates
            .get_rate(CUSTOMS_PRICE_CURRENCY, CUSTOMS_BASE_CURRENCY)
            .await;
        let calc = CustomsCalculation::from_rate(product_price, shipping_cost, &req.category, &rate);
        calc.ensure_finite()?;

        self.record(calc.history_entry()).await;
        Ok(calc)
    }

    /// Computes the tip and per-person share for a restaurant bill.
    pub async fn compute_tip(&self, req: TipRequest) -> Result<TipCalculation, AppError> {
        let meal_amount = require_positive("meal_amount", req.meal_amount)?;

        let party_size = u32::try_from(req.party_size)
            .ok()
            .filter(|size| *size >= 1)
            .ok_or(ValidationError::InvalidPartySize)?;

        let culture = tipping_culture(&req.country_code)
            .ok_or_else(|| ValidationError::UnknownCountry(req.country_code.clone()))?;

        let tip_percent = req.tip_percent.unwrap_or(culture.default_tip_percent);
        if !tip_percent.is_finite() || tip_percent < 0.0 {
            return Err(ValidationError::Negative {
                field: "tip_percent",
            }
            .into());
        }

        let calc = TipCalculation::compute(meal_amount, tip_percent, party_size, culture);
        calc.ensure_finite()?;

        self.record(calc.history_entry()).await;
        Ok(calc)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reference Data
    // ─────────────────────────────────────────────────────────────────────────────

    /// Tipping conventions for a country, used to pre-fill the tip percentage.
    pub fn tip_defaults(&self, country_code: &str) -> Result<TipCultureResponse, AppError> {
        tipping_culture(country_code)
            .map(TipCultureResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Tipping culture for {}", country_code)))
    }

    /// All known tipping cultures.
    pub fn tip_cultures(&self) -> Vec<TipCultureResponse> {
        TIPPING_CULTURES.iter().map(TipCultureResponse::from).collect()
    }

    /// All supported currencies.
    pub fn currencies(&self) -> Vec<CurrencyInfo> {
        CurrencyCode::all().iter().copied().map(CurrencyInfo::from).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────────

    /// Recent calculations, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, AppError> {
        self.history.load_all().await.map_err(Into::into)
    }

    /// Forgets all recorded calculations.
    pub async fn clear_history(&self) -> Result<(), AppError> {
        self.history.clear().await.map_err(Into::into)
    }

    /// History is bookkeeping: a storage failure must not lose the result.
    async fn record(&self, entry: HistoryEntry) {
        if let Err(e) = self.history.append(entry).await {
            warn!(error = %e, "Failed to record calculation history");
        }
    }
}

fn require_positive(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(_) => Err(ValidationError::NonPositive { field }),
    }
}
