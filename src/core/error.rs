//! Error taxonomy for rate loading and conversion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    /// Transport failure or a non-success response from the rates endpoint.
    #[error("Failed to fetch rates from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The response (or a persisted snapshot) is not a valid rate table.
    #[error("Failed to parse rates: {0}")]
    Parse(String),

    #[error("Currency {0} is not present in the rate table")]
    UnsupportedCurrency(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

impl From<serde_json::Error> for RateError {
    fn from(err: serde_json::Error) -> Self {
        RateError::Parse(err.to_string())
    }
}

pub type Result<T, E = RateError> = std::result::Result<T, E>;
