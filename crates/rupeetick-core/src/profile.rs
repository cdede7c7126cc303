//! Static per-symbol reference data.
//!
//! The table is built once on first use and never mutated. Lookups are
//! case-sensitive; any symbol that is not listed resolves to
//! [`DEFAULT_PROFILE`] instead of failing.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Reference figures for one company, all monetary values in USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolProfile {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    pub reference_price: f64,
    /// Full width of the "current quote" jitter around `reference_price`.
    pub price_jitter: f64,
    pub reference_market_cap: f64,
    pub employees: u32,
    pub revenue_ratio: f64,
    pub profit_margin: f64,
    /// Trend multiplier at the start of the ramp.
    pub trend_floor: f64,
    /// Amount the trend multiplier climbs across the ramp.
    pub trend_span: f64,
    /// Heavily traded names report twice the simulated volume.
    pub high_volume: bool,
}

impl SymbolProfile {
    /// Revenue estimate in USD.
    pub fn reference_revenue(&self) -> f64 {
        self.reference_market_cap * self.revenue_ratio
    }

    /// Profit estimate in USD.
    pub fn reference_profit(&self) -> f64 {
        self.reference_revenue() * self.profit_margin
    }
}

/// Profile used for symbols missing from the table.
pub static DEFAULT_PROFILE: SymbolProfile = SymbolProfile {
    symbol: "*",
    name: "Unlisted company",
    sector: "Unclassified",
    reference_price: 175.0,
    price_jitter: 10.0,
    reference_market_cap: 3_000_000_000_000.0,
    employees: 164_000,
    revenue_ratio: 0.08,
    profit_margin: 0.15,
    trend_floor: 0.85,
    trend_span: 0.3,
    high_volume: false,
};

static PROFILES: [SymbolProfile; 8] = [
    SymbolProfile {
        symbol: "AAPL",
        name: "Apple Inc.",
        sector: "Technology",
        reference_price: 175.0,
        price_jitter: 10.0,
        reference_market_cap: 3_000_000_000_000.0,
        employees: 164_000,
        revenue_ratio: 0.08,
        profit_margin: 0.25,
        trend_floor: 0.85,
        trend_span: 0.3,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        sector: "Technology",
        reference_price: 340.0,
        price_jitter: 20.0,
        reference_market_cap: 2_800_000_000_000.0,
        employees: 221_000,
        revenue_ratio: 0.07,
        profit_margin: 0.30,
        trend_floor: 0.80,
        trend_span: 0.4,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "AMZN",
        name: "Amazon.com Inc.",
        sector: "E-commerce",
        reference_price: 140.0,
        price_jitter: 15.0,
        reference_market_cap: 1_500_000_000_000.0,
        employees: 1_540_000,
        revenue_ratio: 0.25,
        profit_margin: 0.05,
        trend_floor: 0.90,
        trend_span: 0.2,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "GOOGL",
        name: "Alphabet Inc.",
        sector: "Technology",
        reference_price: 125.0,
        price_jitter: 10.0,
        reference_market_cap: 1_700_000_000_000.0,
        employees: 190_000,
        revenue_ratio: 0.12,
        profit_margin: 0.20,
        trend_floor: 0.85,
        trend_span: 0.3,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "TSLA",
        name: "Tesla Inc.",
        sector: "Automotive",
        reference_price: 220.0,
        price_jitter: 30.0,
        reference_market_cap: 800_000_000_000.0,
        employees: 140_000,
        revenue_ratio: 0.05,
        profit_margin: 0.08,
        trend_floor: 0.70,
        trend_span: 0.6,
        high_volume: true,
    },
    SymbolProfile {
        symbol: "META",
        name: "Meta Platforms Inc.",
        sector: "Social Media",
        reference_price: 320.0,
        price_jitter: 25.0,
        reference_market_cap: 900_000_000_000.0,
        employees: 77_000,
        revenue_ratio: 0.04,
        profit_margin: 0.25,
        trend_floor: 0.75,
        trend_span: 0.5,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "NVDA",
        name: "NVIDIA Corporation",
        sector: "Technology",
        reference_price: 450.0,
        price_jitter: 40.0,
        reference_market_cap: 1_200_000_000_000.0,
        employees: 29_000,
        revenue_ratio: 0.03,
        profit_margin: 0.25,
        trend_floor: 0.60,
        trend_span: 0.8,
        high_volume: false,
    },
    SymbolProfile {
        symbol: "NFLX",
        name: "Netflix Inc.",
        sector: "Entertainment",
        reference_price: 380.0,
        price_jitter: 30.0,
        reference_market_cap: 180_000_000_000.0,
        employees: 13_000,
        revenue_ratio: 0.15,
        profit_margin: 0.10,
        trend_floor: 0.90,
        trend_span: 0.2,
        high_volume: false,
    },
];

/// Read-only symbol → profile map.
#[derive(Debug)]
pub struct ProfileTable {
    by_symbol: HashMap<&'static str, &'static SymbolProfile>,
}

impl ProfileTable {
    /// Process-wide table, built on first access.
    pub fn global() -> &'static Self {
        static TABLE: OnceLock<ProfileTable> = OnceLock::new();
        TABLE.get_or_init(|| Self {
            by_symbol: PROFILES
                .iter()
                .map(|profile| (profile.symbol, profile))
                .collect(),
        })
    }

    pub fn get(&self, symbol: &str) -> Option<&'static SymbolProfile> {
        self.by_symbol.get(symbol).copied()
    }

    /// Profile for `symbol`, or [`DEFAULT_PROFILE`] when it is not listed.
    pub fn resolve(&self, symbol: &str) -> &'static SymbolProfile {
        self.get(symbol).unwrap_or(&DEFAULT_PROFILE)
    }

    pub fn is_listed(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Listed profiles in display order.
    pub fn listed(&self) -> impl Iterator<Item = &'static SymbolProfile> {
        PROFILES.iter()
    }

    /// Case-insensitive substring match against symbol or company name.
    /// An empty query returns every listed company.
    pub fn search(&self, query: &str) -> Vec<&'static SymbolProfile> {
        let needle = query.trim().to_lowercase();
        self.listed()
            .filter(|profile| {
                profile.symbol.to_lowercase().contains(&needle)
                    || profile.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
