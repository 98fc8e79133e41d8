//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod log;
pub mod rates;
pub mod session;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyPair};
pub use error::RateError;
pub use rates::RateProvider;
pub use snapshot::RateSnapshot;
