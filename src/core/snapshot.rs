//! Rate snapshots and their freshness policy

use super::currency::Currency;
use super::error::{RateError, Result};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One immutable rate table as published by the rates endpoint.
///
/// Rates are multipliers relative to `base`; the base itself is never
/// stored and is implicitly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct RateSnapshot {
    base: String,
    date: NaiveDate,
    rates: BTreeMap<String, f64>,
}

/// Wire form of a snapshot before the table invariants are checked.
#[derive(Deserialize)]
struct RawSnapshot {
    base: String,
    date: NaiveDate,
    rates: BTreeMap<String, f64>,
}

impl TryFrom<RawSnapshot> for RateSnapshot {
    type Error = RateError;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        Self::new(raw.base, raw.date, raw.rates)
    }
}

impl RateSnapshot {
    pub fn new(
        base: impl Into<String>,
        date: NaiveDate,
        rates: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self> {
        let base = base.into();
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            if code == base {
                debug!("Dropping base currency {} from rate table", code);
                continue;
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateError::Parse(format!("invalid rate {rate} for {code}")));
            }
            table.insert(code, rate);
        }
        Ok(Self {
            base,
            date,
            rates: table,
        })
    }

    /// Decodes a snapshot from its JSON form, re-checking the table invariants.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    /// Multiplier for `currency` relative to the base.
    pub fn rate(&self, currency: Currency) -> Result<f64> {
        let code = currency.code();
        if code == self.base {
            return Ok(1.0);
        }
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| RateError::UnsupportedCurrency(code.to_string()))
    }

    pub fn supports(&self, currency: Currency) -> bool {
        self.rate(currency).is_ok()
    }

    /// A snapshot is good for the day after its as-of date; from then on
    /// it must be refreshed.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        match self.date.checked_add_days(Days::new(1)) {
            Some(expires) => expires <= today,
            None => true,
        }
    }
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
