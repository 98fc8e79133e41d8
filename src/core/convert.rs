//! Conversion arithmetic over a rate snapshot

use super::currency::CurrencyPair;
use super::error::{RateError, Result};
use super::snapshot::RateSnapshot;

/// Parses a user-entered amount. A comma is accepted as the decimal separator.
pub fn parse_amount(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(RateError::InvalidAmount(input.to_string())),
    }
}

/// Converts `amount` across `pair`, going through the snapshot's base currency.
pub fn convert(amount: f64, pair: CurrencyPair, rates: &RateSnapshot) -> Result<f64> {
    if pair.is_identity() {
        return Ok(amount);
    }
    let amount_in_base = amount / rates.rate(pair.from)?;
    let converted = amount_in_base * rates.rate(pair.to)?;
    // Out of f64 range for the target currency
    if !converted.is_finite() {
        return Err(RateError::InvalidAmount(format!("{amount:e}")));
    }
    Ok(converted)
}

/// Target-to-source conversion; the same arithmetic with the pair swapped.
pub fn inverse_convert(amount: f64, pair: CurrencyPair, rates: &RateSnapshot) -> Result<f64> {
    convert(amount, pair.swapped(), rates)
}

/// Parses `input` and converts it across `pair`.
pub fn convert_input(input: &str, pair: CurrencyPair, rates: &RateSnapshot) -> Result<f64> {
    convert(parse_amount(input)?, pair, rates)
}

/// Value of one unit in each direction: `(1 from -> to, 1 to -> from)`.
pub fn unit_rates(pair: CurrencyPair, rates: &RateSnapshot) -> Result<(f64, f64)> {
    Ok((convert(1.0, pair, rates)?, inverse_convert(1.0, pair, rates)?))
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use chrono::NaiveDate;

    fn rates() -> RateSnapshot {
        RateSnapshot::new(
            "EUR",
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            [
                ("USD".to_string(), 1.05),
                ("DKK".to_string(), 7.4589),
                ("JPY".to_string(), 168.2),
                ("GBP".to_string(), 0.8612),
            ],
        )
        .unwrap()
    }

    fn pair(from: Currency, to: Currency) -> CurrencyPair {
        CurrencyPair::new(from, to)
    }

    #[test]
    fn test_from_base() {
        let result = convert(10.0, pair(Currency::Eur, Currency::Usd), &rates()).unwrap();
        assert!((result - 10.5).abs() < 1e-9);
        assert_eq!(format_amount(result), "10.50");
    }

    #[test]
    fn test_to_base() {
        let result = convert(10.5, pair(Currency::Usd, Currency::Eur), &rates()).unwrap();
        assert!((result - 10.0).abs() < 1e-9);
        assert_eq!(format_amount(result), "10.00");
    }

    #[test]
    fn test_cross_rate() {
        let result = convert(100.0, pair(Currency::Usd, Currency::Dkk), &rates()).unwrap();
        let expected = 100.0 / 1.05 * 7.4589;
        assert!((result - expected).abs() < 1e-9);
    }

    #[test]
    fn test_identity_returns_amount_unchanged() {
        let snapshot = rates();
        for currency in Currency::ALL {
            // Includes currencies absent from the table
            assert_eq!(
                convert(12.345, pair(currency, currency), &snapshot).unwrap(),
                12.345
            );
        }
    }

    #[test]
    fn test_round_trip_all_supported_pairs() {
        let snapshot = rates();
        let supported: Vec<Currency> = Currency::ALL
            .into_iter()
            .filter(|c| snapshot.supports(*c))
            .collect();
        assert_eq!(supported.len(), 5);

        for from in &supported {
            for to in &supported {
                let p = pair(*from, *to);
                let there = convert(42.5, p, &snapshot).unwrap();
                let back = inverse_convert(there, p, &snapshot).unwrap();
                assert!((back - 42.5).abs() < 1e-9, "{p}: {back}");
            }
        }
    }

    #[test]
    fn test_unsupported_currency() {
        let err = convert(1.0, pair(Currency::Eur, Currency::Hrk), &rates()).unwrap_err();
        assert!(matches!(err, RateError::UnsupportedCurrency(ref c) if c == "HRK"));

        let err = convert(1.0, pair(Currency::Hrk, Currency::Usd), &rates()).unwrap_err();
        assert!(matches!(err, RateError::UnsupportedCurrency(ref c) if c == "HRK"));
    }

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(parse_amount("10,5").unwrap(), parse_amount("10.5").unwrap());
        let p = pair(Currency::Eur, Currency::Usd);
        assert_eq!(
            convert_input("10,5", p, &rates()).unwrap(),
            convert_input("10.5", p, &rates()).unwrap()
        );
    }

    #[test]
    fn test_invalid_amounts() {
        for input in ["", "  ", "abc", "1.2.3", "inf", "NaN"] {
            assert!(
                matches!(parse_amount(input), Err(RateError::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
        assert_eq!(parse_amount(" 7 ").unwrap(), 7.0);
    }

    #[test]
    fn test_unit_rates() {
        let (forward, backward) = unit_rates(pair(Currency::Eur, Currency::Usd), &rates()).unwrap();
        assert!((forward - 1.05).abs() < 1e-12);
        assert!((backward - 1.0 / 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_result_is_invalid() {
        let p = pair(Currency::Eur, Currency::Jpy);
        let err = convert(1e308, p, &rates()).unwrap_err();
        assert!(matches!(err, RateError::InvalidAmount(ref a) if a == "1e308"));
        assert!(matches!(
            convert_input("1e308", p, &rates()),
            Err(RateError::InvalidAmount(_))
        ));

        // Still in range the other way round
        assert!(convert(1e308, p.swapped(), &rates()).unwrap().is_finite());
    }
}
