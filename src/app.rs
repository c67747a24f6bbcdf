//! Conversion state machine.
//!
//! All mutation goes through explicit handlers that return an [`Effect`]
//! when a network fetch is needed; the runtime executes effects and feeds
//! completions back through [`Converter::apply`]. Keeping side effects as
//! values makes the reactive rules (one rate fetch per currency change,
//! swap counts as a single change) directly testable.

use tracing::warn;

use crate::currencies::{self, CurrencyDescriptor};

pub const RATE_FETCH_FAILED: &str = "Failed to fetch exchange rate";
pub const CONVERSION_FAILED: &str = "Conversion failed";
pub const INVALID_AMOUNT: &str = "Enter an amount greater than zero";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

/// Dropdown visibility. A single enum rather than two booleans, so at most
/// one dropdown is open by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Closed,
    FromOpen,
    ToOpen,
}

impl Dropdown {
    pub fn open_side(self) -> Option<Side> {
        match self {
            Dropdown::Closed => None,
            Dropdown::FromOpen => Some(Side::From),
            Dropdown::ToOpen => Some(Side::To),
        }
    }
}

/// A fetch the runtime should execute on behalf of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchRate {
        from: &'static str,
        to: &'static str,
    },
    Convert {
        from: &'static str,
        to: &'static str,
        amount: f64,
    },
}

/// Completion of a fetch, applied back onto the state machine.
#[derive(Debug)]
pub enum Event {
    RateFetched(anyhow::Result<f64>),
    Converted(anyhow::Result<f64>),
}

pub struct Converter {
    /// Raw amount text as typed; validated on submit.
    pub amount_input: String,
    pub from: &'static CurrencyDescriptor,
    pub to: &'static CurrencyDescriptor,
    pub rate: f64,
    pub converted: f64,
    /// Single user-visible error slot; later errors overwrite earlier ones.
    pub error: Option<String>,
    pub dropdown: Dropdown,
    pub search: String,
    /// Cursor into the filtered currency list of the open dropdown.
    pub cursor: usize,
    rate_fetches: u32,
    conversions: u32,
}

impl Converter {
    pub fn new() -> Self {
        Converter {
            amount_input: "1".to_string(),
            from: currencies::find("USD").unwrap(),
            to: currencies::find("THB").unwrap(),
            rate: 0.0,
            converted: 0.0,
            error: None,
            dropdown: Dropdown::Closed,
            search: String::new(),
            cursor: 0,
            rate_fetches: 0,
            conversions: 0,
        }
    }

    pub fn rate_loading(&self) -> bool {
        self.rate_fetches > 0
    }

    pub fn conversion_loading(&self) -> bool {
        self.conversions > 0
    }

    /// Currency list of the open dropdown, filtered by the search query.
    pub fn filtered(&self) -> Vec<&'static CurrencyDescriptor> {
        currencies::filter(&self.search)
    }

    /// Toggles one side's dropdown. Opening a side force-closes the other.
    pub fn toggle_dropdown(&mut self, side: Side) {
        let opened = match side {
            Side::From => Dropdown::FromOpen,
            Side::To => Dropdown::ToOpen,
        };
        self.dropdown = if self.dropdown == opened {
            Dropdown::Closed
        } else {
            opened
        };
        self.search.clear();
        self.cursor = 0;
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.cursor = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.cursor = 0;
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.filtered().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Sets `side` to the given currency and closes the dropdown. Returns
    /// the single rate fetch this change triggers.
    pub fn select(&mut self, side: Side, code: &str) -> Option<Effect> {
        let descriptor = currencies::find(code)?;
        match side {
            Side::From => self.from = descriptor,
            Side::To => self.to = descriptor,
        }
        self.dropdown = Dropdown::Closed;
        self.search.clear();
        self.cursor = 0;
        Some(self.rate_fetch_effect())
    }

    /// Selects the entry under the cursor of the open dropdown.
    pub fn select_cursor(&mut self) -> Option<Effect> {
        let side = self.dropdown.open_side()?;
        let code = self.filtered().get(self.cursor)?.code;
        self.select(side, code)
    }

    /// Exchanges the two currencies as one change event: a single rate
    /// fetch with the swapped pair.
    pub fn swap(&mut self) -> Effect {
        std::mem::swap(&mut self.from, &mut self.to);
        self.rate_fetch_effect()
    }

    /// Explicit refresh of the displayed rate.
    pub fn refresh(&mut self) -> Effect {
        self.rate_fetch_effect()
    }

    pub fn push_amount(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.amount_input.push(c);
        }
    }

    pub fn pop_amount(&mut self) {
        self.amount_input.pop();
    }

    /// Validates the amount and requests a conversion. Invalid input sets
    /// the error slot and issues no request.
    pub fn submit(&mut self) -> Option<Effect> {
        let amount = match self.amount_input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                self.error = Some(INVALID_AMOUNT.to_string());
                return None;
            }
        };
        self.conversions += 1;
        Some(Effect::Convert {
            from: self.from.code,
            to: self.to.code,
            amount,
        })
    }

    /// Applies a fetch completion. Every completion is applied, so with
    /// overlapping fetches the last callback to run wins.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::RateFetched(result) => {
                self.rate_fetches = self.rate_fetches.saturating_sub(1);
                match result {
                    Ok(rate) => {
                        self.rate = rate;
                        self.error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, "Rate fetch failed");
                        self.error = Some(RATE_FETCH_FAILED.to_string());
                    }
                }
            }
            Event::Converted(result) => {
                self.conversions = self.conversions.saturating_sub(1);
                match result {
                    Ok(converted) => {
                        self.converted = converted;
                        self.error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, "Conversion failed");
                        self.error = Some(CONVERSION_FAILED.to_string());
                    }
                }
            }
        }
    }

    fn rate_fetch_effect(&mut self) -> Effect {
        self.rate_fetches += 1;
        Effect::FetchRate {
            from: self.from.code,
            to: self.to.code,
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
