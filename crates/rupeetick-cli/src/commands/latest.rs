use serde::Serialize;

use rupeetick_core::{DataPoint, DisplayMode, MarketDataService, ProfileTable, SeriesOrigin, Symbol};

use crate::cli::LatestArgs;
use crate::error::CliError;

use super::{unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct LatestResponseData {
    symbol: String,
    company: &'static str,
    quote: DataPoint,
    display: QuoteDisplay,
}

#[derive(Debug, Serialize)]
struct QuoteDisplay {
    price: String,
    market_cap: String,
    revenue: String,
    profit: String,
}

pub fn run(args: &LatestArgs, service: &MarketDataService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let profiles = ProfileTable::global();
    let quote = service.latest(symbol.as_str());
    let converter = service.generator().converter();

    let display = QuoteDisplay {
        price: converter.format(quote.price, DisplayMode::Plain),
        market_cap: converter.format(quote.market_cap, DisplayMode::Crores),
        revenue: converter.format(quote.revenue, DisplayMode::Crores),
        profit: converter.format(quote.profit, DisplayMode::Crores),
    };

    Ok(CommandResult::ok(serde_json::to_value(LatestResponseData {
        symbol: symbol.to_string(),
        company: profiles.resolve(symbol.as_str()).name,
        quote,
        display,
    })?)
    .with_origin(SeriesOrigin::Simulated)
    .with_notice(unlisted_warning(&symbol)))
}
