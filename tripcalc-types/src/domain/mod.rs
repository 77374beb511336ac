//! Domain models for the trip calculator.

pub mod calculation;
pub mod customs;
pub mod history;
pub mod rate;
pub mod tipping;

pub use calculation::{CustomsCalculation, ExchangeCalculation, TipCalculation};
pub use customs::CustomsCategory;
pub use history::{HISTORY_LIMIT, HistoryEntry, HistoryKind};
pub use rate::{RateQuery, RateResult, RateTable};
pub use tipping::{CountryCode, TippingCulture};
