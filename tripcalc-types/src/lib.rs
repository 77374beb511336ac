//! # Tripcalc Types
//!
//! Domain types, static reference tables and port traits for the trip
//! calculator. This crate has ZERO IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Rates, calculations, customs and tipping tables, history entries
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation, adapter and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CountryCode, CustomsCalculation, CustomsCategory, ExchangeCalculation, HISTORY_LIMIT,
    HistoryEntry, HistoryKind, RateQuery, RateResult, RateTable, TipCalculation, TippingCulture,
};
pub use dto::*;
pub use error::{AppError, HistoryError, RateSourceError, ValidationError};
pub use exchange_rates::CurrencyCode;
pub use ports::{HistoryStore, RateProvider, RateSource};
