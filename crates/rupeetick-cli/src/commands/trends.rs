use serde::Serialize;

use rupeetick_core::{Granularity, MarketDataService, Symbol, TrendReport};

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct TrendsResponseData {
    #[serde(flatten)]
    report: TrendReport,
    outlook_summary: &'static str,
}

pub async fn run(args: &SeriesArgs, service: &MarketDataService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let granularity = args.granularity.parse::<Granularity>()?;

    let report = service.series(symbol.as_str(), granularity).await;
    let trends = TrendReport::from_series(&report.series, service.generator().converter());

    let data = serde_json::to_value(TrendsResponseData {
        outlook_summary: trends.outlook.describe(),
        report: trends,
    })?;

    Ok(CommandResult::ok(data)
        .with_origin(report.series.origin)
        .with_notice(unlisted_warning(&symbol))
        .with_notice(report.notice))
}
