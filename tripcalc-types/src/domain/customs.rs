//! Import duty reference data.

use std::fmt;
use std::str::FromStr;

use exchange_rates::CurrencyCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Orders strictly below this USD total pay neither duty nor VAT.
/// An order of exactly this amount is dutiable.
pub const DUTY_FREE_LIMIT_USD: f64 = 150.0;

/// VAT applied on top of the duty-inclusive price.
pub const VAT_RATE: f64 = 0.10;

/// Duty rate for the `general` category and for any unrecognized category.
pub const DEFAULT_CUSTOMS_RATE: f64 = 0.13;

/// Currency product prices and shipping are quoted in.
pub const CUSTOMS_PRICE_CURRENCY: CurrencyCode = CurrencyCode::USD;

/// Currency the importing country assesses duty in.
pub const CUSTOMS_BASE_CURRENCY: CurrencyCode = CurrencyCode::KRW;

/// Product categories with a known duty rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomsCategory {
    General,
    Clothes,
    Shoes,
    Cosmetics,
    Electronics,
    Food,
}

impl CustomsCategory {
    pub fn key(&self) -> &'static str {
        match self {
            CustomsCategory::General => "general",
            CustomsCategory::Clothes => "clothes",
            CustomsCategory::Shoes => "shoes",
            CustomsCategory::Cosmetics => "cosmetics",
            CustomsCategory::Electronics => "electronics",
            CustomsCategory::Food => "food",
        }
    }

    /// Duty as a fraction of the base-currency value.
    pub fn duty_rate(&self) -> f64 {
        match self {
            CustomsCategory::General | CustomsCategory::Clothes | CustomsCategory::Shoes => 0.13,
            CustomsCategory::Cosmetics | CustomsCategory::Electronics | CustomsCategory::Food => {
                0.08
            }
        }
    }

    pub fn all() -> &'static [CustomsCategory] {
        &[
            CustomsCategory::General,
            CustomsCategory::Clothes,
            CustomsCategory::Shoes,
            CustomsCategory::Cosmetics,
            CustomsCategory::Electronics,
            CustomsCategory::Food,
        ]
    }
}

impl fmt::Display for CustomsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CustomsCategory {
    type Err = String;

    /// Keys match exactly: `"Electronics"` is not a known category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("Unknown customs category: {}", s))
    }
}

/// Duty rate for a raw category key. Unknown keys get [`DEFAULT_CUSTOMS_RATE`]
/// rather than an error.
pub fn customs_rate(category: &str) -> f64 {
    category
        .parse::<CustomsCategory>()
        .map(|c| c.duty_rate())
        .unwrap_or(DEFAULT_CUSTOMS_RATE)
}
