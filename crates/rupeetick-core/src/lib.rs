//! Core library for rupeetick.
//!
//! This crate contains:
//! - Domain models (dated data points, series, granularities, symbols)
//! - USD → INR conversion and lakh/crore formatting
//! - The synthetic series generator and its per-symbol profile table
//! - The Alpha Vantage live source with circuit breaker and throttle
//! - The live-first market data service with synthetic fallback
//! - Trend and chart views, response envelope and configuration

pub mod analysis;
pub mod circuit_breaker;
pub mod config;
pub mod currency;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod generator;
pub mod http_client;
pub mod live;
pub mod profile;
pub mod service;

pub use analysis::{ChartData, Metric, Outlook, TrendCard, TrendDirection, TrendReport};
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use config::MarketConfig;
pub use currency::{CurrencyConverter, DisplayMode, USD_TO_INR_RATE};
pub use domain::{DataPoint, Granularity, IsoDate, Series, SeriesOrigin, Symbol};
pub use envelope::{Envelope, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use generator::SeriesGenerator;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use live::{AlphaVantageSource, FetchError, FetchErrorKind, LiveSeriesSource};
pub use profile::{ProfileTable, SymbolProfile, DEFAULT_PROFILE};
pub use service::{MarketDataService, SeriesReport};
