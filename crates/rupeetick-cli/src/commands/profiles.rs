use serde::Serialize;

use rupeetick_core::{DisplayMode, SeriesGenerator};

use crate::error::CliError;

use super::CommandResult;

/// Reference figures converted to INR.
#[derive(Debug, Serialize)]
struct ProfileRow {
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    reference_price: f64,
    market_cap: String,
    revenue: String,
    profit: String,
    employees: u32,
}

pub fn run(generator: &SeriesGenerator) -> Result<CommandResult, CliError> {
    let converter = generator.converter();
    let rows = generator
        .profiles()
        .listed()
        .map(|profile| ProfileRow {
            symbol: profile.symbol,
            name: profile.name,
            sector: profile.sector,
            reference_price: converter.convert(profile.reference_price),
            market_cap: converter.format(
                converter.convert(profile.reference_market_cap),
                DisplayMode::Crores,
            ),
            revenue: converter.format(
                converter.convert(profile.reference_revenue()),
                DisplayMode::Crores,
            ),
            profit: converter.format(
                converter.convert(profile.reference_profit()),
                DisplayMode::Crores,
            ),
            employees: profile.employees,
        })
        .collect::<Vec<_>>();

    Ok(CommandResult::ok(serde_json::json!({ "profiles": rows })))
}
