use super::ui;
use crate::core::convert;
use crate::core::session::{ConverterState, ConverterView, Field, InputEvent};
use crate::core::{CurrencyPair, RateSnapshot};
use anyhow::{Context, Result};

/// Converts `amount` entered in the source field, or in the target field
/// when `reverse` is set, and renders both sides plus the unit rates.
pub fn render_conversion(
    amount: &str,
    pair: CurrencyPair,
    reverse: bool,
    rates: &RateSnapshot,
) -> Result<String> {
    let field = if reverse { Field::To } else { Field::From };
    let mut state = ConverterState::new(pair);
    state.apply(InputEvent::AmountChanged {
        field,
        text: amount.to_string(),
    });
    let view = state.view(Some(rates));

    let derived = match field {
        Field::From => &view.to,
        Field::To => &view.from,
    };
    if derived.is_empty() {
        // Surface why the view left the field empty
        let direction = if reverse { pair.swapped() } else { pair };
        convert::convert_input(amount, direction, rates)
            .with_context(|| format!("Cannot convert {amount} {}", direction))?;
    }

    Ok(format_view(&view, pair, rates))
}

fn format_view(view: &ConverterView, pair: CurrencyPair, rates: &RateSnapshot) -> String {
    let mut output = format!(
        "{} {} = {} {}\n",
        view.from,
        pair.from,
        ui::style_text(&view.to, ui::StyleType::Amount),
        pair.to
    );
    if let Some((forward, backward)) = view.unit_rates {
        output.push_str(&format!(
            "\n1 {} = {} {}\n1 {} = {} {}\n",
            pair.from,
            ui::format_rate(forward),
            pair.to,
            pair.to,
            ui::format_rate(backward),
            pair.from
        ));
    }
    output.push_str(&ui::style_text(
        &format!("\nRates as of {} (base {})", rates.date(), rates.base()),
        ui::StyleType::Subtle,
    ));
    output
}
