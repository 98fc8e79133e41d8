//! Supported currencies and currency pairs

use super::error::RateError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Aud,
    Bgn,
    Brl,
    Cad,
    Chf,
    Cny,
    Czk,
    Dkk,
    Eur,
    Gbp,
    Hkd,
    Hrk,
    Huf,
    Idr,
    Ils,
    Inr,
    Isk,
    Jpy,
    Krw,
    Mxn,
    Myr,
    Nok,
    Nzd,
    Php,
    Pln,
    Ron,
    Sek,
    Sgd,
    Thb,
    Try,
    Usd,
    Zar,
}

impl Currency {
    /// Every supported currency, sorted by code.
    pub const ALL: [Currency; 32] = [
        Currency::Aud,
        Currency::Bgn,
        Currency::Brl,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Czk,
        Currency::Dkk,
        Currency::Eur,
        Currency::Gbp,
        Currency::Hkd,
        Currency::Hrk,
        Currency::Huf,
        Currency::Idr,
        Currency::Ils,
        Currency::Inr,
        Currency::Isk,
        Currency::Jpy,
        Currency::Krw,
        Currency::Mxn,
        Currency::Myr,
        Currency::Nok,
        Currency::Nzd,
        Currency::Php,
        Currency::Pln,
        Currency::Ron,
        Currency::Sek,
        Currency::Sgd,
        Currency::Thb,
        Currency::Try,
        Currency::Usd,
        Currency::Zar,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Bgn => "BGN",
            Currency::Brl => "BRL",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Czk => "CZK",
            Currency::Dkk => "DKK",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Hkd => "HKD",
            Currency::Hrk => "HRK",
            Currency::Huf => "HUF",
            Currency::Idr => "IDR",
            Currency::Ils => "ILS",
            Currency::Inr => "INR",
            Currency::Isk => "ISK",
            Currency::Jpy => "JPY",
            Currency::Krw => "KRW",
            Currency::Mxn => "MXN",
            Currency::Myr => "MYR",
            Currency::Nok => "NOK",
            Currency::Nzd => "NZD",
            Currency::Php => "PHP",
            Currency::Pln => "PLN",
            Currency::Ron => "RON",
            Currency::Sek => "SEK",
            Currency::Sgd => "SGD",
            Currency::Thb => "THB",
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Zar => "ZAR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Aud => "Australian Dollar",
            Currency::Bgn => "Bulgarian Lev",
            Currency::Brl => "Brazilian Real",
            Currency::Cad => "Canadian Dollar",
            Currency::Chf => "Swiss Franc",
            Currency::Cny => "Chinese Renminbi Yuan",
            Currency::Czk => "Czech Koruna",
            Currency::Dkk => "Danish Krone",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Hkd => "Hong Kong Dollar",
            Currency::Hrk => "Croatian Kuna",
            Currency::Huf => "Hungarian Forint",
            Currency::Idr => "Indonesian Rupiah",
            Currency::Ils => "Israeli New Sheqel",
            Currency::Inr => "Indian Rupee",
            Currency::Isk => "Icelandic Króna",
            Currency::Jpy => "Japanese Yen",
            Currency::Krw => "South Korean Won",
            Currency::Mxn => "Mexican Peso",
            Currency::Myr => "Malaysian Ringgit",
            Currency::Nok => "Norwegian Krone",
            Currency::Nzd => "New Zealand Dollar",
            Currency::Php => "Philippine Peso",
            Currency::Pln => "Polish Złoty",
            Currency::Ron => "Romanian Leu",
            Currency::Sek => "Swedish Krona",
            Currency::Sgd => "Singapore Dollar",
            Currency::Thb => "Thai Baht",
            Currency::Try => "Turkish Lira",
            Currency::Usd => "United States Dollar",
            Currency::Zar => "South African Rand",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| RateError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = RateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    pub fn swapped(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::new(Currency::Eur, Currency::Dkk)
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" Eur ".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency code: XYZ");
    }

    #[test]
    fn test_all_is_sorted_and_round_trips() {
        let codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);

        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_pair_swap_and_serde() {
        let pair = CurrencyPair::default();
        assert_eq!(pair.swapped(), CurrencyPair::new(Currency::Dkk, Currency::Eur));
        assert!(!pair.is_identity());

        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"from":"EUR","to":"DKK"}"#);

        let bad: Result<CurrencyPair, _> = serde_json::from_str(r#"{"from":"EUR","to":"XXX"}"#);
        assert!(bad.is_err());
    }
}
