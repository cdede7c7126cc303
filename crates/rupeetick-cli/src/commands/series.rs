use serde::Serialize;

use rupeetick_core::{
    DataPoint, Granularity, MarketDataService, ProfileTable, SeriesOrigin, Symbol,
};

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct SeriesResponseData {
    symbol: String,
    company: &'static str,
    sector: &'static str,
    granularity: Granularity,
    origin: SeriesOrigin,
    points: Vec<DataPoint>,
}

pub async fn run(args: &SeriesArgs, service: &MarketDataService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let granularity = args.granularity.parse::<Granularity>()?;

    let report = service.series(symbol.as_str(), granularity).await;
    let profile = ProfileTable::global().resolve(symbol.as_str());
    let origin = report.series.origin;

    let data = serde_json::to_value(SeriesResponseData {
        symbol: report.series.symbol,
        company: profile.name,
        sector: profile.sector,
        granularity,
        origin,
        points: report.series.points,
    })?;

    Ok(CommandResult::ok(data)
        .with_origin(origin)
        .with_notice(unlisted_warning(&symbol))
        .with_notice(report.notice))
}
