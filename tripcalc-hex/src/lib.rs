//! # Tripcalc Hex
//!
//! Application service layer and HTTP adapter for the trip calculator.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation, rate lookup, history)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: RateProvider` and `H: HistoryStore`,
//! allowing different rate sources and history backends to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::CalculatorService;
