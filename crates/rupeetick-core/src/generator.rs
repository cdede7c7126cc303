//! Synthetic market-series generator.
//!
//! Produces a dated, chronologically ordered series for any symbol and
//! granularity. Prices follow a per-profile trend ramp with a cyclical
//! ripple and bounded noise; market cap moves with the price, and revenue and
//! profit follow the same trend with their own jitter. Every monetary figure
//! goes through [`CurrencyConverter`] before it leaves this module.
//!
//! The random source is always passed in, so a seeded
//! [`rand::rngs::StdRng`] makes a run fully reproducible:
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use rupeetick_core::{Granularity, IsoDate, SeriesGenerator};
//!
//! let generator = SeriesGenerator::default();
//! let today = IsoDate::parse("2024-06-28").unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let series = generator.generate("AAPL", Granularity::Weekly, today, &mut rng);
//! assert_eq!(series.len(), 12);
//! assert!(series.is_chronological());
//! ```

use std::f64::consts::PI;

use rand::Rng;

use crate::profile::{ProfileTable, SymbolProfile};
use crate::{CurrencyConverter, DataPoint, Granularity, IsoDate, Series, SeriesOrigin};

/// Amplitude of the sine ripple laid over the trend ramp.
const CYCLE_AMPLITUDE: f64 = 0.05;
/// Full ripples across one series.
const CYCLE_COUNT: f64 = 6.0;
const BASE_VOLUME: f64 = 50_000_000.0;
const VOLUME_SPREAD: f64 = 100_000_000.0;
const REVENUE_JITTER: f64 = 0.1;
const PROFIT_JITTER: f64 = 0.2;

/// Builds synthetic series from the profile table and a fixed exchange rate.
#[derive(Debug, Clone, Copy)]
pub struct SeriesGenerator {
    converter: CurrencyConverter,
    profiles: &'static ProfileTable,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new(CurrencyConverter::default())
    }
}

impl SeriesGenerator {
    pub fn new(converter: CurrencyConverter) -> Self {
        Self {
            converter,
            profiles: ProfileTable::global(),
        }
    }

    pub const fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub const fn profiles(&self) -> &'static ProfileTable {
        self.profiles
    }

    /// Generates `granularity.periods()` points ending on `today`.
    ///
    /// Never fails: unknown symbols fall back to the default profile.
    pub fn generate<R>(
        &self,
        symbol: &str,
        granularity: Granularity,
        today: IsoDate,
        rng: &mut R,
    ) -> Series
    where
        R: Rng + ?Sized,
    {
        let profile = self.profiles.resolve(symbol);
        let periods = granularity.periods();
        let volatility = granularity.volatility();

        // Converted once; trend and noise scale the rupee figure.
        let base_price = self.converter.convert(current_reference_price(profile, rng));
        let market_cap = self.converter.convert(profile.reference_market_cap);
        let revenue = self.converter.convert(profile.reference_revenue());
        let profit = self.converter.convert(profile.reference_profit());

        let mut points = Vec::with_capacity(periods);
        for index in (0..periods).rev() {
            let date = today.step_back(granularity, index as u32);
            let trend = trend_factor(index, periods, profile);
            let noise = 1.0 + centered(rng) * volatility;

            let volume_multiplier = if profile.high_volume { 2.0 } else { 1.0 };
            let volume = ((BASE_VOLUME + rng.gen::<f64>() * VOLUME_SPREAD) * volume_multiplier)
                .round() as u64;

            points.push(DataPoint {
                date,
                price: round_cents(base_price * trend * noise),
                volume,
                market_cap: (market_cap * trend * noise).round(),
                revenue: (revenue * trend * (1.0 + centered(rng) * REVENUE_JITTER)).round(),
                profit: (profit * trend * (1.0 + centered(rng) * PROFIT_JITTER)).round(),
                employees: profile.employees,
            });
        }

        Series::new(symbol, granularity, SeriesOrigin::Simulated, points)
    }

    /// One "current quote" point dated `today`, without trend scaling.
    pub fn latest_quote<R>(&self, symbol: &str, today: IsoDate, rng: &mut R) -> DataPoint
    where
        R: Rng + ?Sized,
    {
        let profile = self.profiles.resolve(symbol);
        let price = self.converter.convert(current_reference_price(profile, rng));
        let volume = (BASE_VOLUME + rng.gen::<f64>() * VOLUME_SPREAD).round() as u64;

        DataPoint {
            date: today,
            price,
            volume,
            market_cap: self.converter.convert(profile.reference_market_cap),
            revenue: self.converter.convert(profile.reference_revenue()),
            profit: self.converter.convert(profile.reference_profit()),
            employees: profile.employees,
        }
    }
}

/// Reference price with a bounded jitter, standing in for a live quote (USD).
pub fn current_reference_price<R>(profile: &SymbolProfile, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    profile.reference_price + centered(rng) * profile.price_jitter
}

/// Trend multiplier at `index` of `periods`.
///
/// Linear ramp from `trend_floor` to `trend_floor + trend_span` over
/// `progress = index / periods`, times a `1 ± 0.05` sine ripple. Continuous
/// in `progress`; stays within
/// `[floor * 0.95, (floor + span) * 1.05]`.
pub fn trend_factor(index: usize, periods: usize, profile: &SymbolProfile) -> f64 {
    let progress = if periods == 0 {
        0.0
    } else {
        index as f64 / periods as f64
    };
    let ramp = profile.trend_floor + progress * profile.trend_span;
    let cycle = 1.0 + CYCLE_AMPLITUDE * (progress * PI * CYCLE_COUNT).sin();
    ramp * cycle
}

/// Uniform draw in `[-0.5, 0.5)`.
fn centered<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.gen::<f64>() - 0.5
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::profile::DEFAULT_PROFILE;

    fn today() -> IsoDate {
        IsoDate::parse("2024-03-31").expect("valid date")
    }

    #[test]
    fn period_counts_follow_granularity() {
        let generator = SeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);

        for granularity in Granularity::ALL {
            let series = generator.generate("MSFT", granularity, today(), &mut rng);
            assert_eq!(series.len(), granularity.periods(), "{granularity}");
            assert!(series.is_chronological(), "{granularity}");
            assert_eq!(series.origin, SeriesOrigin::Simulated);
        }
    }

    #[test]
    fn newest_point_is_dated_today() {
        let generator = SeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(2);

        let series = generator.generate("AMZN", Granularity::Monthly, today(), &mut rng);
        assert_eq!(series.latest().map(|point| point.date), Some(today()));
        assert_eq!(series.points[0].date.to_string(), "2023-04-30");
    }

    #[test]
    fn same_seed_reproduces_series() {
        let generator = SeriesGenerator::default();
        let first = generator.generate(
            "TSLA",
            Granularity::Daily,
            today(),
            &mut StdRng::seed_from_u64(42),
        );
        let second = generator.generate(
            "TSLA",
            Granularity::Daily,
            today(),
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn tesla_volume_is_doubled() {
        let generator = SeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(3);

        let series = generator.generate("TSLA", Granularity::Daily, today(), &mut rng);
        for point in &series.points {
            assert!((100_000_000..=300_000_000).contains(&point.volume));
        }

        let regular = generator.generate("NFLX", Granularity::Daily, today(), &mut rng);
        for point in &regular.points {
            assert!((50_000_000..=150_000_000).contains(&point.volume));
        }
    }

    #[test]
    fn prices_stay_inside_trend_and_noise_bounds() {
        let generator = SeriesGenerator::default();
        let converter = CurrencyConverter::default();
        let profile = ProfileTable::global().resolve("NVDA");
        let mut rng = StdRng::seed_from_u64(4);

        let low = converter.convert(profile.reference_price - profile.price_jitter / 2.0)
            * profile.trend_floor
            * (1.0 - CYCLE_AMPLITUDE)
            * (1.0 - Granularity::Yearly.volatility() / 2.0);
        let high = converter.convert(profile.reference_price + profile.price_jitter / 2.0)
            * (profile.trend_floor + profile.trend_span)
            * (1.0 + CYCLE_AMPLITUDE)
            * (1.0 + Granularity::Yearly.volatility() / 2.0);

        for _ in 0..50 {
            let series = generator.generate("NVDA", Granularity::Yearly, today(), &mut rng);
            for point in &series.points {
                assert!(point.price >= low - 0.01 && point.price <= high + 0.01);
            }
        }
    }

    #[test]
    fn market_cap_moves_with_price() {
        let generator = SeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(5);
        let series = generator.generate("GOOGL", Granularity::Weekly, today(), &mut rng);

        // Same trend and noise multiply both, so the ratio is constant up to rounding.
        let ratios = series
            .points
            .iter()
            .map(|point| point.market_cap / point.price)
            .collect::<Vec<_>>();
        let first = ratios[0];
        for ratio in &ratios {
            assert!((ratio - first).abs() / first < 1e-3);
        }
    }

    #[test]
    fn trend_factor_is_bounded_and_continuous() {
        let profile = &DEFAULT_PROFILE;
        let periods = 1_000;
        let mut previous = trend_factor(0, periods, profile);
        for index in 1..periods {
            let value = trend_factor(index, periods, profile);
            assert!(value >= profile.trend_floor * (1.0 - CYCLE_AMPLITUDE));
            assert!(value <= (profile.trend_floor + profile.trend_span) * (1.0 + CYCLE_AMPLITUDE));
            assert!((value - previous).abs() < 0.01);
            previous = value;
        }
    }

    #[test]
    fn latest_quote_uses_unscaled_reference_figures() {
        let generator = SeriesGenerator::default();
        let converter = CurrencyConverter::default();
        let mut rng = StdRng::seed_from_u64(6);

        let quote = generator.latest_quote("META", today(), &mut rng);
        let profile = ProfileTable::global().resolve("META");

        assert_eq!(quote.date, today());
        assert_eq!(quote.market_cap, converter.convert(profile.reference_market_cap));
        assert_eq!(quote.employees, 77_000);
        let low = converter.convert(profile.reference_price - profile.price_jitter / 2.0);
        let high = converter.convert(profile.reference_price + profile.price_jitter / 2.0);
        assert!(quote.price >= low && quote.price <= high);
    }
}
