//! Tipping culture reference table.

use std::fmt;
use std::str::FromStr;

use exchange_rates::CurrencyCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Countries with a known tipping culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    USA,
    CAN,
    GBR,
    FRA,
    JPN,
    CHN,
}

impl CountryCode {
    pub fn code(&self) -> &'static str {
        match self {
            CountryCode::USA => "USA",
            CountryCode::CAN => "CAN",
            CountryCode::GBR => "GBR",
            CountryCode::FRA => "FRA",
            CountryCode::JPN => "JPN",
            CountryCode::CHN => "CHN",
        }
    }

    /// The tipping culture for this country.
    pub fn culture(&self) -> &'static TippingCulture {
        match self {
            CountryCode::USA => &TIPPING_CULTURES[0],
            CountryCode::CAN => &TIPPING_CULTURES[1],
            CountryCode::GBR => &TIPPING_CULTURES[2],
            CountryCode::FRA => &TIPPING_CULTURES[3],
            CountryCode::JPN => &TIPPING_CULTURES[4],
            CountryCode::CHN => &TIPPING_CULTURES[5],
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CountryCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        TIPPING_CULTURES
            .iter()
            .map(|c| c.country_code)
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("Unknown country: {}", s))
    }
}

/// Per-country gratuity conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct TippingCulture {
    pub country_code: CountryCode,
    pub display_name: &'static str,
    /// Percentage pre-selected when the country is chosen
    pub default_tip_percent: f64,
    pub currency_code: CurrencyCode,
    pub currency_symbol: &'static str,
    pub guidance_text: &'static str,
}

pub static TIPPING_CULTURES: [TippingCulture; 6] = [
    TippingCulture {
        country_code: CountryCode::USA,
        display_name: "United States",
        default_tip_percent: 15.0,
        currency_code: CurrencyCode::USD,
        currency_symbol: "$",
        guidance_text: "15-20% is customary; 20% or more for good service.",
    },
    TippingCulture {
        country_code: CountryCode::CAN,
        display_name: "Canada",
        default_tip_percent: 15.0,
        currency_code: CurrencyCode::CAD,
        currency_symbol: "$",
        guidance_text: "15-20% is standard, adjusted to the service.",
    },
    TippingCulture {
        country_code: CountryCode::GBR,
        display_name: "United Kingdom",
        default_tip_percent: 10.0,
        currency_code: CurrencyCode::GBP,
        currency_symbol: "£",
        guidance_text: "10-15% is common; check whether a service charge is already included.",
    },
    TippingCulture {
        country_code: CountryCode::FRA,
        display_name: "France",
        default_tip_percent: 0.0,
        currency_code: CurrencyCode::EUR,
        currency_symbol: "€",
        guidance_text: "Service is included in the bill, so any extra tip is optional.",
    },
    TippingCulture {
        country_code: CountryCode::JPN,
        display_name: "Japan",
        default_tip_percent: 0.0,
        currency_code: CurrencyCode::JPY,
        currency_symbol: "¥",
        guidance_text: "There is no tipping culture and a tip can be considered rude.",
    },
    TippingCulture {
        country_code: CountryCode::CHN,
        display_name: "China",
        default_tip_percent: 0.0,
        currency_code: CurrencyCode::CNY,
        currency_symbol: "¥",
        guidance_text: "Tips are mostly unnecessary; around 10% is possible at upscale restaurants.",
    },
];

/// Resolves a raw country code (case-insensitive) to its culture.
pub fn tipping_culture(country: &str) -> Option<&'static TippingCulture> {
    country.parse::<CountryCode>().ok().map(|c| c.culture())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_country() {
        for culture in TIPPING_CULTURES.iter() {
            assert_eq!(culture.country_code.culture(), culture);
        }
    }

    #[test]
    fn test_default_rates() {
        assert_eq!(CountryCode::USA.culture().default_tip_percent, 15.0);
        assert_eq!(CountryCode::CAN.culture().default_tip_percent, 15.0);
        assert_eq!(CountryCode::GBR.culture().default_tip_percent, 10.0);
        assert_eq!(CountryCode::FRA.culture().default_tip_percent, 0.0);
        assert_eq!(CountryCode::JPN.culture().default_tip_percent, 0.0);
        assert_eq!(CountryCode::CHN.culture().default_tip_percent, 0.0);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(tipping_culture("gbr").unwrap().currency_symbol, "£");
        assert!(tipping_culture("DEU").is_none());
    }
}
