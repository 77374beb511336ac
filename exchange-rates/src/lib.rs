//! Supported Currencies and Fallback Exchange Rates
//!
//! Currencies are defined declaratively with the `define_currencies!` macro,
//! which generates the closed [`CurrencyCode`] enum together with its
//! metadata accessors, parsing and display impls.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     AUD => ("AUD", "$", "Australian Dollar", 2),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, fallback_rate};
//!
//! let usd: CurrencyCode = "usd".parse().unwrap();
//! assert_eq!(usd.symbol(), "$");
//!
//! // Static snapshot used when the live source is unreachable
//! assert_eq!(fallback_rate(CurrencyCode::USD, CurrencyCode::KRW), 1448.0);
//! ```

mod fallback;

pub use fallback::{FALLBACK_RATES, FALLBACK_SNAPSHOT_DATE, fallback_rate, has_fallback_rate};

/// Error returned when a string does not name a supported currency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct ParseCurrencyError(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define supported currencies with auto-generated metadata.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "SYMBOL", "display name", fraction_digits),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal, $digits:expr)
        ),* $(,)?
    ) => {
        /// ISO 4217 codes of the currencies the calculators accept.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            /// Number of minor-unit digits conventionally shown for this currency.
            pub fn fraction_digits(&self) -> usize {
                match self {
                    $(CurrencyCode::$name => $digits),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::ParseCurrencyError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::ParseCurrencyError(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", "US Dollar", 2),
    EUR => ("EUR", "€", "Euro", 2),
    JPY => ("JPY", "¥", "Japanese Yen", 0),
    CNY => ("CNY", "¥", "Chinese Yuan", 2),
    GBP => ("GBP", "£", "British Pound", 2),
    KRW => ("KRW", "₩", "South Korean Won", 0),
    CAD => ("CAD", "$", "Canadian Dollar", 2),
}

impl CurrencyCode {
    /// Formats an amount with this currency's fraction digits, e.g. `144800 KRW`.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{:.*} {}", self.fraction_digits(), amount, self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
