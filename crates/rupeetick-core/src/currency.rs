//! USD → INR conversion and rupee display formatting.
//!
//! Large rupee figures are shown in the Indian units used on the dashboard:
//!
//! | Unit | Value |
//! |------|-------|
//! | lakh (L) | 1,00,000 |
//! | crore (Cr) | 1,00,00,000 |
//! | lakh crore | 1,00,000 crore |

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Fixed USD → INR rate used when configuration does not override it.
pub const USD_TO_INR_RATE: f64 = 83.25;

const RUPEE: &str = "₹";
const ONE_LAKH: f64 = 100_000.0;
const ONE_CRORE: f64 = 10_000_000.0;
/// Crore figures at or above this are shown in lakh crore.
const LAKH_CRORE_THRESHOLD: f64 = 1_000.0;
/// Lakh figures at or above this are shown in crore.
const CRORE_FROM_LAKHS_THRESHOLD: f64 = 10_000.0;
const LARGE_AMOUNT_THRESHOLD: f64 = 10_000_000_000.0;

/// How a rupee amount is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Full figure with Indian digit grouping, e.g. `₹12,34,567`.
    Plain,
    /// Crore units, escalating to lakh crore.
    Crores,
    /// Lakh units, escalating to crore.
    Lakhs,
}

/// Converts base-currency (USD) magnitudes to rupees at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConverter {
    rate: f64,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self {
            rate: USD_TO_INR_RATE,
        }
    }
}

impl CurrencyConverter {
    pub fn with_rate(rate: f64) -> Result<Self, ValidationError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ValidationError::InvalidExchangeRate { value: rate });
        }
        Ok(Self { rate })
    }

    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// USD amount to whole rupees. Callers must pass finite values.
    pub fn convert(&self, amount_usd: f64) -> f64 {
        (amount_usd * self.rate).round()
    }

    pub fn format(&self, amount: f64, mode: DisplayMode) -> String {
        match mode {
            DisplayMode::Plain => format!("{RUPEE}{}", group_indian(amount)),
            DisplayMode::Crores => {
                let crores = amount / ONE_CRORE;
                if crores >= LAKH_CRORE_THRESHOLD {
                    format!("{RUPEE}{:.2} Lakh Cr", crores / LAKH_CRORE_THRESHOLD)
                } else {
                    format!("{RUPEE}{crores:.2} Cr")
                }
            }
            DisplayMode::Lakhs => {
                let lakhs = amount / ONE_LAKH;
                if lakhs >= CRORE_FROM_LAKHS_THRESHOLD {
                    format!("{RUPEE}{:.2} Cr", lakhs / CRORE_FROM_LAKHS_THRESHOLD)
                } else {
                    format!("{RUPEE}{lakhs:.2} L")
                }
            }
        }
    }

    /// Picks crores for ≥ 1000 Cr, lakhs for ≥ 1 L, plain otherwise.
    pub fn format_large(&self, amount: f64) -> String {
        let mode = if amount >= LARGE_AMOUNT_THRESHOLD {
            DisplayMode::Crores
        } else if amount >= ONE_LAKH {
            DisplayMode::Lakhs
        } else {
            DisplayMode::Plain
        };
        self.format(amount, mode)
    }
}

/// en-IN grouping: last three integer digits, then pairs (`12,34,56,789`).
/// Keeps up to three fractional digits and drops trailing zeros.
fn group_indian(amount: f64) -> String {
    let rendered = format!("{:.3}", amount.abs());
    let (integer, fraction) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 2 + 4);
    if integer.len() > 3 {
        let (head, tail) = integer.split_at(integer.len() - 3);
        let lead = head.len() % 2;
        if lead == 1 {
            grouped.push_str(&head[..1]);
        }
        for (index, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
            if index > 0 || lead == 1 {
                grouped.push(',');
            }
            grouped.extend(pair.iter().map(|byte| char::from(*byte)));
        }
        grouped.push(',');
        grouped.push_str(tail);
    } else {
        grouped.push_str(integer);
    }

    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    if amount.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}
