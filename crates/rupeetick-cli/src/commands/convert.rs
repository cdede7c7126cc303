use serde::Serialize;

use rupeetick_core::{CurrencyConverter, DisplayMode, ValidationError};

use crate::cli::{ConvertArgs, ModeArg};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ConvertResponseData {
    amount_usd: f64,
    exchange_rate: f64,
    amount_inr: f64,
    display: String,
}

pub fn run(args: &ConvertArgs, converter: &CurrencyConverter) -> Result<CommandResult, CliError> {
    if !args.amount.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "amount" }.into());
    }

    let amount_inr = converter.convert(args.amount);
    let display = match args.mode {
        ModeArg::Auto => converter.format_large(amount_inr),
        ModeArg::Plain => converter.format(amount_inr, DisplayMode::Plain),
        ModeArg::Crores => converter.format(amount_inr, DisplayMode::Crores),
        ModeArg::Lakhs => converter.format(amount_inr, DisplayMode::Lakhs),
    };

    Ok(CommandResult::ok(serde_json::to_value(ConvertResponseData {
        amount_usd: args.amount,
        exchange_rate: converter.rate(),
        amount_inr,
        display,
    })?))
}
