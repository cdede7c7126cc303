use rupeetick_core::{ChartData, Granularity, MarketDataService, Metric, Symbol};

use crate::cli::ChartArgs;
use crate::error::CliError;

use super::{unlisted_warning, CommandResult};

pub async fn run(args: &ChartArgs, service: &MarketDataService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let granularity = args.granularity.parse::<Granularity>()?;
    let metric = args.metric.parse::<Metric>()?;

    let report = service.series(symbol.as_str(), granularity).await;
    let chart = ChartData::from_series(&report.series, metric);

    Ok(CommandResult::ok(serde_json::to_value(chart)?)
        .with_origin(report.series.origin)
        .with_notice(unlisted_warning(&symbol))
        .with_notice(report.notice))
}
