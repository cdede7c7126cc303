//! CLI argument definitions for rupeetick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | Dated metric series for a symbol (live, or simulated on failure) |
//! | `latest` | Current quote with rupee display strings |
//! | `trends` | Latest-vs-previous trend cards and outlook |
//! | `chart` | Label/value projection of one metric |
//! | `search` | Find listed companies by symbol or name |
//! | `convert` | Convert a USD amount to INR |
//! | `profiles` | List the reference profile table |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Skip the live fetch, always simulate |
//! | `--seed` | none | Seed for reproducible simulated data |
//! | `--strict` | `false` | Treat warnings as errors |
//!
//! # Examples
//!
//! ```bash
//! rupeetick series AAPL --granularity weekly --pretty
//! rupeetick trends TSLA --granularity monthly --offline --seed 7
//! rupeetick convert 2500000000 --mode crores
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Company metrics in Indian Rupees, live when possible and simulated otherwise.
#[derive(Debug, Parser)]
#[command(
    name = "rupeetick",
    author,
    version,
    about = "Company metrics in INR with live-first, simulated-fallback data",
    long_about = "rupeetick shows stock price, volume, market cap, revenue, profit and head count \
for a company over daily, weekly, monthly or yearly buckets. Figures are converted from USD to \
INR and can be displayed in lakh and crore units.\n\
\n\
Live closes come from Alpha Vantage; when that fails the series is simulated and the \
response carries a warning.\n\
\n\
Environment: RUPEETICK_EXCHANGE_RATE, RUPEETICK_ALPHAVANTAGE_API_KEY, RUPEETICK_OFFLINE, \
RUPEETICK_SEED, RUPEETICK_TIMEOUT_MS, RUST_LOG."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Never call the live provider.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Seed for simulated data. Overrides RUPEETICK_SEED.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Treat any warning as a failure (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminals.
    Table,
    /// Single JSON envelope.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a dated metric series.
    ///
    ///   rupeetick series AAPL
    ///   rupeetick series MSFT --granularity monthly
    Series(SeriesArgs),

    /// Current quote for a symbol.
    Latest(LatestArgs),

    /// Trend cards comparing the two most recent points.
    Trends(SeriesArgs),

    /// Chart projection of one metric.
    ///
    ///   rupeetick chart NVDA --metric market_cap --granularity yearly
    Chart(ChartArgs),

    /// Search listed companies by symbol or name.
    Search(SearchArgs),

    /// Convert a USD amount to INR.
    Convert(ConvertArgs),

    /// List reference profiles.
    Profiles,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Ticker symbol (case-insensitive).
    pub symbol: String,

    /// daily (30 points), weekly (12), monthly (12) or yearly (5).
    #[arg(long, short, default_value = "daily")]
    pub granularity: String,
}

#[derive(Debug, Args)]
pub struct LatestArgs {
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    pub symbol: String,

    #[arg(long, short, default_value = "daily")]
    pub granularity: String,

    /// price, volume, market_cap, revenue, profit or employees.
    #[arg(long, short, default_value = "price")]
    pub metric: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring of a symbol or company name. Empty lists everything.
    #[arg(default_value = "")]
    pub query: String,

    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount in USD.
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    pub mode: ModeArg,
}

/// Rupee display unit for `convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Pick crores, lakhs or plain by size.
    Auto,
    Plain,
    Crores,
    Lakhs,
}
