use serde::Serialize;

use rupeetick_core::{SeriesGenerator, SymbolProfile};

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
struct SearchHit {
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
}

impl From<&SymbolProfile> for SearchHit {
    fn from(profile: &SymbolProfile) -> Self {
        Self {
            symbol: profile.symbol,
            name: profile.name,
            sector: profile.sector,
        }
    }
}

pub fn run(args: &SearchArgs, generator: &SeriesGenerator) -> Result<CommandResult, CliError> {
    if args.limit == 0 {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let query = args.query.trim();
    let results = generator
        .profiles()
        .search(query)
        .into_iter()
        .take(args.limit)
        .map(SearchHit::from)
        .collect::<Vec<_>>();

    let no_match = results
        .is_empty()
        .then(|| format!("no listed company matches '{query}'"));

    Ok(CommandResult::ok(serde_json::to_value(SearchResponseData {
        query: query.to_owned(),
        results,
    })?)
    .with_notice(no_match))
}
