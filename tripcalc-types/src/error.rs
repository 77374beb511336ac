//! Error types for the trip calculator.

use exchange_rates::CurrencyCode;

/// Input validation errors (reported before any rate lookup).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be a positive number")]
    NonPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} is too large to calculate")]
    OutOfRange { field: &'static str },

    #[error("Party size must be a whole number of at least 1")]
    InvalidPartySize,

    #[error("Unknown tipping country: {0}")]
    UnknownCountry(String),
}

/// Errors raised while fetching a rate table from the remote source.
///
/// These never reach the calculators: the rate provider recovers from all of
/// them by substituting a fallback rate.
#[derive(Debug, thiserror::Error)]
pub enum RateSourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Rate API reported an error: {0}")]
    Api(String),

    #[error("Malformed rate response: {0}")]
    Parse(String),

    #[error("No usable {quote} rate in {base} table")]
    MissingRate { base: String, quote: CurrencyCode },
}

/// History store errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt history record: {0}")]
    Corrupt(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::Internal(err.to_string())
    }
}
