//! Data Transfer Objects (DTOs) for requests and responses.

use exchange_rates::CurrencyCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CountryCode, TippingCulture};

// ─────────────────────────────────────────────────────────────────────────────
// Calculation requests
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRequest {
    /// Amount in the `from` currency; must be positive
    #[schema(example = 100.0)]
    #[serde(default)]
    pub amount: Option<f64>,
    pub from: CurrencyCode,
    #[serde(default = "default_target_currency")]
    pub to: CurrencyCode,
}

fn default_target_currency() -> CurrencyCode {
    CurrencyCode::KRW
}

/// Request to estimate import duty on an overseas order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomsRequest {
    /// Product price in USD; must be positive
    #[schema(example = 200.0)]
    #[serde(default)]
    pub product_price: Option<f64>,
    /// Shipping cost in USD; absent, negative or non-finite values count as 0
    #[schema(example = 0.0)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    /// Category key (general, clothes, shoes, cosmetics, electronics, food).
    /// Unknown keys are charged the general rate.
    #[schema(example = "clothes")]
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// Request to compute a tip and split the bill.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TipRequest {
    /// Bill before tip; must be positive
    #[schema(example = 100.0)]
    #[serde(default)]
    pub meal_amount: Option<f64>,
    /// Tip percentage; defaults to the country's customary rate
    #[schema(example = 15.0)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_percent: Option<f64>,
    /// Number of people splitting the bill
    #[schema(example = 4)]
    #[serde(default = "default_party_size")]
    pub party_size: i64,
    /// Country code (USA, CAN, GBR, FRA, JPN, CHN)
    #[schema(example = "USA")]
    pub country_code: String,
}

fn default_party_size() -> i64 {
    1
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference data responses
// ─────────────────────────────────────────────────────────────────────────────

/// A supported currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    #[schema(example = "US Dollar")]
    pub name: String,
    #[schema(example = "$")]
    pub symbol: String,
    #[schema(example = 2)]
    pub fraction_digits: usize,
}

impl From<CurrencyCode> for CurrencyInfo {
    fn from(code: CurrencyCode) -> Self {
        Self {
            code,
            name: code.name().to_string(),
            symbol: code.symbol().to_string(),
            fraction_digits: code.fraction_digits(),
        }
    }
}

/// Tipping conventions for a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TipCultureResponse {
    pub country_code: CountryCode,
    #[schema(example = "United States")]
    pub display_name: String,
    #[schema(example = 15.0)]
    pub default_tip_percent: f64,
    pub currency_code: CurrencyCode,
    #[schema(example = "$")]
    pub currency_symbol: String,
    pub guidance_text: String,
}

impl From<&TippingCulture> for TipCultureResponse {
    fn from(culture: &TippingCulture) -> Self {
        Self {
            country_code: culture.country_code,
            display_name: culture.display_name.to_string(),
            default_tip_percent: culture.default_tip_percent,
            currency_code: culture.currency_code,
            currency_symbol: culture.currency_symbol.to_string(),
            guidance_text: culture.guidance_text.to_string(),
        }
    }
}
