mod chart;
mod convert;
mod latest;
mod profiles;
mod search;
mod series;
mod trends;

use std::time::Instant;

use rupeetick_core::{Envelope, MarketConfig, ProfileTable, SeriesOrigin, Symbol};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub origin: Option<SeriesOrigin>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: SeriesOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_notice(self, notice: Option<String>) -> Self {
        match notice {
            Some(notice) => self.with_warning(notice),
            None => self,
        }
    }
}

/// Warning for symbols that fall back to the default profile.
pub fn unlisted_warning(symbol: &Symbol) -> Option<String> {
    if ProfileTable::global().is_listed(symbol.as_str()) {
        None
    } else {
        Some(format!(
            "{symbol} is not a listed profile; using default reference figures"
        ))
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let config = MarketConfig::from_env()?;
    // --offline can only switch live fetching off, never back on.
    let offline = cli.offline || config.offline;
    let config = config.with_offline(offline).with_seed(cli.seed);
    let service = config.build_service()?;
    tracing::debug!(
        offline = service.is_offline(),
        seeded = config.seed.is_some(),
        rate = config.exchange_rate,
        "market data service ready"
    );

    let command_result = match &cli.command {
        Command::Series(args) => series::run(args, &service).await?,
        Command::Latest(args) => latest::run(args, &service)?,
        Command::Trends(args) => trends::run(args, &service).await?,
        Command::Chart(args) => chart::run(args, &service).await?,
        Command::Search(args) => search::run(args, service.generator())?,
        Command::Convert(args) => convert::run(args, service.generator().converter())?,
        Command::Profiles => profiles::run(service.generator())?,
    };

    let CommandResult {
        data,
        warnings,
        origin,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut metadata = Metadata::new(origin, config.exchange_rate, latency_ms);
    for warning in warnings {
        metadata.push_warning(warning);
    }

    let meta = metadata.into_envelope_meta()?;
    Envelope::new(meta, data).map_err(CliError::from)
}
