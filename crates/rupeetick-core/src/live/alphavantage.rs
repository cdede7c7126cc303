use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use super::{FetchError, LiveSeriesSource, RequestThrottle};
use crate::circuit_breaker::CircuitBreaker;
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::profile::ProfileTable;
use crate::{CurrencyConverter, DataPoint, Granularity, IsoDate, Series, SeriesOrigin};

pub const ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage `TIME_SERIES_DAILY` adapter.
///
/// Closing prices come from the provider; market cap, revenue, profit and
/// head count are filled from the symbol profile.
#[derive(Clone)]
pub struct AlphaVantageSource {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
    converter: CurrencyConverter,
    profiles: &'static ProfileTable,
    circuit_breaker: Arc<CircuitBreaker>,
    throttle: RequestThrottle,
}

impl AlphaVantageSource {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            converter: CurrencyConverter::default(),
            profiles: ProfileTable::global(),
            circuit_breaker: Arc::new(CircuitBreaker::default()),
            throttle: RequestThrottle::default(),
        }
    }

    pub fn with_converter(mut self, converter: CurrencyConverter) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_throttle(mut self, throttle: RequestThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    fn endpoint(&self, symbol: &str) -> String {
        format!(
            "{}?function=TIME_SERIES_DAILY&symbol={}&apikey={}&outputsize=full",
            ALPHAVANTAGE_BASE_URL,
            urlencoding::encode(symbol),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn fetch_daily(&self, symbol: &str, granularity: Granularity) -> Result<Series, FetchError> {
        if !self.circuit_breaker.allow_request() {
            return Err(FetchError::unavailable("alphavantage circuit breaker is open"));
        }

        if let Err(delay) = self.throttle.acquire() {
            return Err(FetchError::rate_limited(format!(
                "alphavantage free-tier limit exceeded; retry in {:.2}s",
                delay.as_secs_f64()
            )));
        }

        let request = HttpRequest::get(self.endpoint(symbol))
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms);
        tracing::debug!(symbol, granularity = %granularity, "requesting alphavantage daily series");

        let response = self.http_client.execute(request).await.map_err(|e| {
            self.circuit_breaker.record_failure();
            FetchError::network(format!("alphavantage transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            self.circuit_breaker.record_failure();
            return Err(FetchError::network(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        // A 200 carrying a quota notice or junk still counts against the breaker.
        let mapped = serde_json::from_str::<DailySeriesPayload>(&response.body)
            .map_err(|e| FetchError::malformed(format!("failed to parse alphavantage response: {e}")))
            .and_then(|payload| self.map_payload(payload, symbol, granularity));
        match &mapped {
            Ok(_) => self.circuit_breaker.record_success(),
            Err(_) => self.circuit_breaker.record_failure(),
        }
        mapped
    }

    /// Newest `periods` closes, emitted oldest first.
    fn map_payload(
        &self,
        payload: DailySeriesPayload,
        symbol: &str,
        granularity: Granularity,
    ) -> Result<Series, FetchError> {
        let days = match payload.time_series {
            Some(days) => days,
            None => return Err(payload.missing_series_error()),
        };
        if days.is_empty() {
            return Err(FetchError::malformed("alphavantage returned an empty series"));
        }

        let profile = self.profiles.resolve(symbol);
        let market_cap = self.converter.convert(profile.reference_market_cap);
        let revenue = self.converter.convert(profile.reference_revenue());
        let profit = self.converter.convert(profile.reference_profit());

        let skip = days.len().saturating_sub(granularity.periods());
        let points = days
            .into_iter()
            .skip(skip)
            .map(|(date, day)| {
                let date = IsoDate::parse(&date)
                    .map_err(|e| FetchError::malformed(format!("bad series date: {e}")))?;
                let close = parse_field::<f64>(&day.close, "4. close", date)?;
                if close.is_nan() || close <= 0.0 {
                    return Err(FetchError::malformed(format!(
                        "non-positive '4. close' value '{}' on {date}",
                        day.close
                    )));
                }
                let volume = parse_field::<u64>(&day.volume, "5. volume", date)?;

                DataPoint::new(
                    date,
                    self.converter.convert(close),
                    volume,
                    market_cap,
                    revenue,
                    profit,
                    profile.employees,
                )
                .map_err(|e| FetchError::malformed(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Series::new(symbol, granularity, SeriesOrigin::Live, points))
    }
}

impl std::fmt::Debug for AlphaVantageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageSource")
            .field("timeout_ms", &self.timeout_ms)
            .field("circuit", &self.circuit_breaker.state())
            .finish_non_exhaustive()
    }
}

impl LiveSeriesSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    fn fetch_series<'a>(
        &'a self,
        symbol: &'a str,
        granularity: Granularity,
    ) -> Pin<Box<dyn Future<Output = Result<Series, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_daily(symbol, granularity))
    }
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    field: &str,
    date: IsoDate,
) -> Result<T, FetchError> {
    raw.trim().parse::<T>().map_err(|_| {
        FetchError::malformed(format!("unparsable '{field}' value '{raw}' on {date}"))
    })
}

/// `TIME_SERIES_DAILY` body. Keys of the series map are `yyyy-MM-dd`, so the
/// `BTreeMap` iterates oldest first.
#[derive(Debug, Deserialize)]
struct DailySeriesPayload {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

impl DailySeriesPayload {
    fn missing_series_error(self) -> FetchError {
        if let Some(message) = self.error_message {
            return FetchError::malformed(format!("alphavantage error: {message}"));
        }
        // Quota notices arrive as 200 responses.
        match self.note.or(self.information) {
            Some(message) => FetchError::rate_limited(format!("alphavantage notice: {message}")),
            None => FetchError::malformed("no daily time series in alphavantage response"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}
