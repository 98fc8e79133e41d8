use super::ui;
use crate::core::{Currency, RateSnapshot};
use comfy_table::Cell;

/// Table of every supported currency against the snapshot's base.
pub fn rates_table(rates: &RateSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {}", rates.base())),
    ]);

    for currency in Currency::ALL {
        let rate = match rates.rate(currency) {
            Ok(rate) => ui::rate_cell(rate),
            Err(_) => ui::na_cell(),
        };
        table.add_row(vec![Cell::new(currency.code()), Cell::new(currency.name()), rate]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text(
            &format!("Rates as of {} (base {})", rates.date(), rates.base()),
            ui::StyleType::Title
        )
    )
}

/// Table of supported currency codes and names.
pub fn currencies_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for currency in Currency::ALL {
        table.add_row(vec![Cell::new(currency.code()), Cell::new(currency.name())]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rates_table_marks_missing_currencies() {
        let rates = RateSnapshot::new(
            "EUR",
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            [("USD".to_string(), 1.0772)],
        )
        .unwrap();

        let output = rates_table(&rates);
        assert!(output.contains("Rates as of 2024-05-10 (base EUR)"));
        assert!(output.contains("Per 1 EUR"));
        assert!(output.contains("1.0772"));
        assert!(output.contains("1.0000"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_currencies_table_lists_all() {
        let output = currencies_table();
        for currency in Currency::ALL {
            assert!(output.contains(currency.code()));
        }
        assert!(output.contains("Icelandic Króna"));
    }
}
