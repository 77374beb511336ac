//! Calculation results and the pure arithmetic behind them.
//!
//! All amounts are returned at full `f64` precision. Rounding to whole or
//! fractional currency units is left to whoever renders the result; the only
//! place rounding happens here is the human-readable history summary.

use chrono::NaiveDate;
use exchange_rates::CurrencyCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;

use super::customs::{DUTY_FREE_LIMIT_USD, VAT_RATE, customs_rate};
use super::history::{HistoryEntry, HistoryKind};
use super::rate::RateResult;
use super::tipping::{CountryCode, TippingCulture};

/// Huge but finite inputs can overflow to infinity, which JSON cannot carry.
fn check_finite(fields: &[(&'static str, f64)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(ValidationError::OutOfRange { field: *field }),
        None => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange
// ─────────────────────────────────────────────────────────────────────────────

/// Result of converting an amount between two currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeCalculation {
    #[schema(example = 100.0)]
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    #[schema(example = 144800.0)]
    pub converted_amount: f64,
    #[schema(example = 1448.0)]
    pub rate_used: f64,
    pub as_of_date: NaiveDate,
    /// Set when the rate came from the static fallback snapshot
    pub is_fallback: bool,
}

impl ExchangeCalculation {
    /// `converted_amount = amount * rate`, unrounded.
    pub fn from_rate(amount: f64, rate: &RateResult) -> Self {
        Self {
            amount,
            from: rate.base,
            to: rate.quote_currency,
            converted_amount: amount * rate.rate,
            rate_used: rate.rate,
            as_of_date: rate.as_of_date,
            is_fallback: rate.is_fallback,
        }
    }

    pub fn ensure_finite(&self) -> Result<(), ValidationError> {
        check_finite(&[("converted_amount", self.converted_amount)])
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(
            HistoryKind::Exchange,
            format!("{} → {}", self.from, self.to),
            format!(
                "{} {} = {}",
                self.amount,
                self.from,
                self.to.format_amount(self.converted_amount)
            ),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customs
// ─────────────────────────────────────────────────────────────────────────────

/// Import duty and VAT breakdown for an overseas purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomsCalculation {
    /// Category key as supplied by the caller
    #[schema(example = "clothes")]
    pub category: String,
    /// Duty fraction applied (0.13 for unknown categories)
    #[schema(example = 0.13)]
    pub customs_rate: f64,
    #[schema(example = 200.0)]
    pub total_usd: f64,
    #[schema(example = 280000.0)]
    pub total_base_currency: f64,
    pub base_currency: CurrencyCode,
    #[schema(example = 36400.0)]
    pub duty_amount: f64,
    #[schema(example = 31640.0)]
    pub vat_amount: f64,
    #[schema(example = 348040.0)]
    pub final_total: f64,
    pub is_duty_free: bool,
    pub rate_used: f64,
    pub as_of_date: NaiveDate,
    pub is_fallback: bool,
}

impl CustomsCalculation {
    /// Applies the duty-free threshold, duty and VAT to a USD order.
    ///
    /// `rate` must be the USD to base-currency rate. Totals strictly below
    /// [`DUTY_FREE_LIMIT_USD`] are duty-free; a total equal to the limit is
    /// dutiable.
    pub fn from_rate(
        product_price: f64,
        shipping_cost: f64,
        category: &str,
        rate: &RateResult,
    ) -> Self {
        let customs_rate = customs_rate(category);
        let total_usd = product_price + shipping_cost;
        let total_base_currency = total_usd * rate.rate;

        let (duty_amount, vat_amount, final_total, is_duty_free) = if total_usd < DUTY_FREE_LIMIT_USD
        {
            (0.0, 0.0, total_base_currency, true)
        } else {
            let duty = total_base_currency * customs_rate;
            let vat = (total_base_currency + duty) * VAT_RATE;
            (duty, vat, total_base_currency + duty + vat, false)
        };

        Self {
            category: category.to_string(),
            customs_rate,
            total_usd,
            total_base_currency,
            base_currency: rate.quote_currency,
            duty_amount,
            vat_amount,
            final_total,
            is_duty_free,
            rate_used: rate.rate,
            as_of_date: rate.as_of_date,
            is_fallback: rate.is_fallback,
        }
    }

    pub fn ensure_finite(&self) -> Result<(), ValidationError> {
        check_finite(&[
            ("total_usd", self.total_usd),
            ("total_base_currency", self.total_base_currency),
            ("duty_amount", self.duty_amount),
            ("vat_amount", self.vat_amount),
            ("final_total", self.final_total),
        ])
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(
            HistoryKind::Customs,
            format!("{} customs", self.category),
            format!("Total: {}", self.base_currency.format_amount(self.final_total)),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tip
// ─────────────────────────────────────────────────────────────────────────────

/// Gratuity and per-person split for a restaurant bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TipCalculation {
    pub country_code: CountryCode,
    pub currency: CurrencyCode,
    #[schema(example = "$")]
    pub currency_symbol: String,
    #[schema(example = 100.0)]
    pub meal_amount: f64,
    #[schema(example = 15.0)]
    pub tip_percent: f64,
    #[schema(example = 4)]
    pub party_size: u32,
    #[schema(example = 15.0)]
    pub tip_amount: f64,
    #[schema(example = 115.0)]
    pub total_amount: f64,
    #[schema(example = 28.75)]
    pub per_person_amount: f64,
}

impl TipCalculation {
    /// `party_size` must already be validated as at least 1.
    pub fn compute(
        meal_amount: f64,
        tip_percent: f64,
        party_size: u32,
        culture: &TippingCulture,
    ) -> Self {
        let tip_amount = meal_amount * (tip_percent / 100.0);
        let total_amount = meal_amount + tip_amount;
        let per_person_amount = total_amount / f64::from(party_size);

        Self {
            country_code: culture.country_code,
            currency: culture.currency_code,
            currency_symbol: culture.currency_symbol.to_string(),
            meal_amount,
            tip_percent,
            party_size,
            tip_amount,
            total_amount,
            per_person_amount,
        }
    }

    pub fn ensure_finite(&self) -> Result<(), ValidationError> {
        check_finite(&[
            ("tip_amount", self.tip_amount),
            ("total_amount", self.total_amount),
            ("per_person_amount", self.per_person_amount),
        ])
    }

    pub fn history_entry(&self) -> HistoryEntry {
        let s = &self.currency_symbol;
        HistoryEntry::new(
            HistoryKind::Tip,
            format!("{} tip", self.country_code),
            format!(
                "Meal: {s}{:.2} + Tip: {s}{:.2} = {s}{:.2}",
                self.meal_amount, self.tip_amount, self.total_amount
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate::RateQuery;

    fn usd_krw(rate: f64) -> RateResult {
        RateResult::live(
            RateQuery::new(CurrencyCode::USD, CurrencyCode::KRW),
            rate,
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_exchange_is_unrounded_product() {
        let rate = usd_krw(1448.37);
        let calc = ExchangeCalculation::from_rate(12.34, &rate);
        assert_eq!(calc.converted_amount, 12.34 * 1448.37);
        assert_eq!(calc.rate_used, 1448.37);
        assert!(!calc.is_fallback);
    }

    #[test]
    fn test_overflowing_results_are_rejected() {
        let exchange = ExchangeCalculation::from_rate(1e306, &usd_krw(1400.0));
        assert_eq!(
            exchange.ensure_finite(),
            Err(ValidationError::OutOfRange {
                field: "converted_amount"
            })
        );
        assert!(ExchangeCalculation::from_rate(100.0, &usd_krw(1400.0)).ensure_finite().is_ok());

        let customs = CustomsCalculation::from_rate(1e306, 0.0, "general", &usd_krw(1400.0));
        assert_eq!(
            customs.ensure_finite(),
            Err(ValidationError::OutOfRange {
                field: "total_base_currency"
            })
        );

        let culture = CountryCode::USA.culture();
        let tip = TipCalculation::compute(1e300, 1e300, 1, culture);
        assert_eq!(
            tip.ensure_finite(),
            Err(ValidationError::OutOfRange { field: "tip_amount" })
        );
    }

    #[test]
    fn test_exchange_history_summary() {
        let calc = ExchangeCalculation::from_rate(100.0, &usd_krw(1448.0));
        let entry = calc.history_entry();
        assert_eq!(entry.kind, HistoryKind::Exchange);
        assert_eq!(entry.title, "USD → KRW");
        assert_eq!(entry.result_summary, "100 USD = 144800 KRW");
    }

    #[test]
    fn test_customs_under_limit_is_duty_free() {
        let calc = CustomsCalculation::from_rate(100.0, 20.0, "electronics", &usd_krw(1400.0));
        assert!(calc.is_duty_free);
        assert!(close(calc.total_usd, 120.0));
        assert!(close(calc.final_total, 168_000.0));
        assert_eq!(calc.duty_amount, 0.0);
        assert_eq!(calc.vat_amount, 0.0);
        assert_eq!(calc.customs_rate, 0.08);
    }

    #[test]
    fn test_customs_over_limit_breakdown() {
        let calc = CustomsCalculation::from_rate(200.0, 0.0, "clothes", &usd_krw(1400.0));
        assert!(!calc.is_duty_free);
        assert!(close(calc.total_base_currency, 280_000.0));
        assert!(close(calc.duty_amount, 36_400.0));
        assert!(close(calc.vat_amount, 31_640.0));
        assert!(close(calc.final_total, 348_040.0));
    }

    #[test]
    fn test_customs_boundary_is_inclusive() {
        let rate = usd_krw(1400.0);
        assert!(!CustomsCalculation::from_rate(150.0, 0.0, "general", &rate).is_duty_free);
        assert!(CustomsCalculation::from_rate(149.99, 0.0, "general", &rate).is_duty_free);
        // shipping counts towards the limit
        assert!(!CustomsCalculation::from_rate(140.0, 10.0, "general", &rate).is_duty_free);
    }

    #[test]
    fn test_customs_unknown_category_uses_default_rate() {
        let calc = CustomsCalculation::from_rate(200.0, 0.0, "furniture", &usd_krw(1000.0));
        assert_eq!(calc.customs_rate, 0.13);
        assert!(close(calc.duty_amount, 26_000.0));
    }

    #[test]
    fn test_customs_history_summary() {
        let calc = CustomsCalculation::from_rate(200.0, 0.0, "clothes", &usd_krw(1400.0));
        let entry = calc.history_entry();
        assert_eq!(entry.title, "clothes customs");
        assert_eq!(entry.result_summary, "Total: 348040 KRW");
    }

    #[test]
    fn test_tip_split() {
        let calc = TipCalculation::compute(100.0, 15.0, 4, CountryCode::USA.culture());
        assert!(close(calc.tip_amount, 15.0));
        assert!(close(calc.total_amount, 115.0));
        assert!(close(calc.per_person_amount, 28.75));
        assert_eq!(calc.currency_symbol, "$");
    }

    #[test]
    fn test_tip_zero_percent() {
        let calc = TipCalculation::compute(8000.0, 0.0, 2, CountryCode::JPN.culture());
        assert_eq!(calc.tip_amount, 0.0);
        assert_eq!(calc.per_person_amount, 4000.0);
        assert_eq!(calc.currency, CurrencyCode::JPY);
    }

    #[test]
    fn test_tip_history_summary() {
        let calc = TipCalculation::compute(100.0, 15.0, 4, CountryCode::USA.culture());
        let entry = calc.history_entry();
        assert_eq!(entry.title, "USA tip");
        assert_eq!(entry.result_summary, "Meal: $100.00 + Tip: $15.00 = $115.00");
    }
}
