//! Converter state driven by explicit input events

use super::convert::{self, format_amount};
use super::currency::{Currency, CurrencyPair};
use super::snapshot::RateSnapshot;
use tracing::debug;

/// The amount field the user last typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    From,
    To,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    AmountChanged { field: Field, text: String },
    FromCurrencyChanged(Currency),
    ToCurrencyChanged(Currency),
    Swap,
}

/// Display strings for both fields plus the loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterView {
    pub from: String,
    pub to: String,
    pub loaded: bool,
    /// `(1 from -> to, 1 to -> from)` when both currencies are in the table.
    pub unit_rates: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    pair: CurrencyPair,
    focus: Field,
    input: String,
}

impl ConverterState {
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            ..Default::default()
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn apply(&mut self, event: InputEvent) {
        debug!(?event, "Applying converter event");
        match event {
            InputEvent::AmountChanged { field, text } => {
                self.focus = field;
                self.input = text;
            }
            InputEvent::FromCurrencyChanged(currency) => self.pair.from = currency,
            InputEvent::ToCurrencyChanged(currency) => self.pair.to = currency,
            InputEvent::Swap => self.pair = self.pair.swapped(),
        }
    }

    /// Derives what both fields should show. Only the field without focus is
    /// computed, so an edit never feeds back into the field being edited.
    pub fn view(&self, rates: Option<&RateSnapshot>) -> ConverterView {
        let Some(rates) = rates else {
            return self.layout(String::new(), false, None);
        };

        let derived = if self.input.trim().is_empty() {
            String::new()
        } else {
            let direction = match self.focus {
                Field::From => self.pair,
                Field::To => self.pair.swapped(),
            };
            match convert::convert_input(&self.input, direction, rates) {
                Ok(amount) => format_amount(amount),
                Err(e) => {
                    debug!(error = %e, pair = %direction, "Leaving converted field empty");
                    String::new()
                }
            }
        };

        let unit_rates = convert::unit_rates(self.pair, rates).ok();
        self.layout(derived, true, unit_rates)
    }

    fn layout(&self, derived: String, loaded: bool, unit_rates: Option<(f64, f64)>) -> ConverterView {
        let (from, to) = match self.focus {
            Field::From => (self.input.clone(), derived),
            Field::To => (derived, self.input.clone()),
        };
        ConverterView {
            from,
            to,
            loaded,
            unit_rates,
        }
    }
}
