//! Live-first market data with synthetic fallback.
//!
//! [`MarketDataService::series`] tries the configured [`LiveSeriesSource`]
//! and, on any failure, returns the generator's series for the same symbol
//! and granularity along with a notice describing why live data was skipped.
//! Callers always get a well-formed series back.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::live::LiveSeriesSource;
use crate::{DataPoint, Granularity, IsoDate, Series, SeriesGenerator};

/// Series plus an optional notice when live data could not be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    pub series: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub struct MarketDataService {
    live: Option<Arc<dyn LiveSeriesSource>>,
    generator: SeriesGenerator,
    rng: Mutex<StdRng>,
    anchor: Option<IsoDate>,
}

impl MarketDataService {
    /// Service that tries `live` first.
    pub fn new(live: Arc<dyn LiveSeriesSource>, generator: SeriesGenerator) -> Self {
        Self {
            live: Some(live),
            generator,
            rng: Mutex::new(StdRng::from_entropy()),
            anchor: None,
        }
    }

    /// Service that never attempts a live fetch.
    pub fn offline(generator: SeriesGenerator) -> Self {
        Self {
            live: None,
            generator,
            rng: Mutex::new(StdRng::from_entropy()),
            anchor: None,
        }
    }

    /// Makes simulated output reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Pins "today" instead of reading the system clock.
    pub fn with_anchor(mut self, anchor: IsoDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub const fn generator(&self) -> &SeriesGenerator {
        &self.generator
    }

    pub fn is_offline(&self) -> bool {
        self.live.is_none()
    }

    fn today(&self) -> IsoDate {
        self.anchor.unwrap_or_else(IsoDate::today)
    }

    fn simulate(&self, symbol: &str, granularity: Granularity) -> Series {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generator
            .generate(symbol, granularity, self.today(), &mut *rng)
    }

    pub async fn series(&self, symbol: &str, granularity: Granularity) -> SeriesReport {
        let Some(live) = &self.live else {
            tracing::debug!(symbol, granularity = %granularity, "offline; generating series");
            return SeriesReport {
                series: self.simulate(symbol, granularity),
                notice: None,
            };
        };

        match live.fetch_series(symbol, granularity).await {
            Ok(series) if !series.is_empty() => {
                tracing::info!(
                    symbol,
                    granularity = %granularity,
                    points = series.len(),
                    source = live.name(),
                    "live series loaded"
                );
                SeriesReport {
                    series,
                    notice: None,
                }
            }
            Ok(_) => {
                tracing::warn!(symbol, source = live.name(), "live source returned no points; using simulated data");
                SeriesReport {
                    series: self.simulate(symbol, granularity),
                    notice: Some(format!(
                        "live data from {} returned no points for {symbol}; showing simulated data",
                        live.name()
                    )),
                }
            }
            Err(error) => {
                tracing::warn!(
                    symbol,
                    source = live.name(),
                    code = error.code(),
                    retryable = error.retryable(),
                    error = %error,
                    "live fetch failed; using simulated data"
                );
                SeriesReport {
                    series: self.simulate(symbol, granularity),
                    notice: Some(format!(
                        "live data from {} unavailable for {symbol} ({error}); showing simulated data",
                        live.name()
                    )),
                }
            }
        }
    }

    /// Current quote. Always simulated.
    pub fn latest(&self, symbol: &str) -> DataPoint {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generator.latest_quote(symbol, self.today(), &mut *rng)
    }
}

impl std::fmt::Debug for MarketDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataService")
            .field("live", &self.live.as_ref().map(|live| live.name()))
            .field("generator", &self.generator)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use super::*;
    use crate::live::FetchError;
    use crate::SeriesOrigin;

    struct FailingSource;

    impl LiveSeriesSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fetch_series<'a>(
            &'a self,
            _symbol: &'a str,
            _granularity: Granularity,
        ) -> Pin<Box<dyn Future<Output = Result<Series, FetchError>> + Send + 'a>> {
            Box::pin(async { Err(FetchError::network("connection reset")) })
        }
    }

    struct EmptySource;

    impl LiveSeriesSource for EmptySource {
        fn name(&self) -> &'static str {
            "empty"
        }

        fn fetch_series<'a>(
            &'a self,
            symbol: &'a str,
            granularity: Granularity,
        ) -> Pin<Box<dyn Future<Output = Result<Series, FetchError>> + Send + 'a>> {
            Box::pin(async move {
                Ok(Series::new(symbol, granularity, SeriesOrigin::Live, Vec::new()))
            })
        }
    }

    fn anchor() -> IsoDate {
        IsoDate::parse("2024-06-28").expect("valid date")
    }

    #[tokio::test]
    async fn failure_falls_back_with_notice() {
        let service = MarketDataService::new(Arc::new(FailingSource), SeriesGenerator::default())
            .with_seed(9)
            .with_anchor(anchor());

        let report = service.series("AAPL", Granularity::Weekly).await;

        assert_eq!(report.series.origin, SeriesOrigin::Simulated);
        assert_eq!(report.series.len(), 12);
        let notice = report.notice.expect("fallback carries a notice");
        assert!(notice.contains("network_failure"));
        assert!(notice.contains("AAPL"));
    }

    #[tokio::test]
    async fn empty_live_series_also_falls_back() {
        let service = MarketDataService::new(Arc::new(EmptySource), SeriesGenerator::default())
            .with_anchor(anchor());

        let report = service.series("TSLA", Granularity::Yearly).await;
        assert_eq!(report.series.len(), 5);
        assert!(report.notice.is_some());
    }

    #[tokio::test]
    async fn offline_mode_skips_notice_and_is_seeded() {
        let first = MarketDataService::offline(SeriesGenerator::default())
            .with_seed(3)
            .with_anchor(anchor());
        let second = MarketDataService::offline(SeriesGenerator::default())
            .with_seed(3)
            .with_anchor(anchor());

        let a = first.series("MSFT", Granularity::Daily).await;
        let b = second.series("MSFT", Granularity::Daily).await;

        assert!(first.is_offline());
        assert_eq!(a.notice, None);
        assert_eq!(a, b);
        assert_eq!(first.latest("MSFT").date, anchor());
    }
}
