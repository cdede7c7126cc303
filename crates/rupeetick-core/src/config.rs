//! Startup configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `RUPEETICK_EXCHANGE_RATE` | `83.25` | USD → INR rate, finite and > 0 |
//! | `RUPEETICK_ALPHAVANTAGE_API_KEY` / `ALPHAVANTAGE_API_KEY` | `demo` | Alpha Vantage key |
//! | `RUPEETICK_OFFLINE` | off | `1`/`true`/`yes`/`on` skips the live fetch |
//! | `RUPEETICK_SEED` | entropy | Seed for simulated data |
//! | `RUPEETICK_TIMEOUT_MS` | `5000` | Live request timeout |

use std::env;
use std::sync::Arc;

use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::live::AlphaVantageSource;
use crate::{CoreError, CurrencyConverter, MarketDataService, SeriesGenerator, USD_TO_INR_RATE};

pub const ENV_EXCHANGE_RATE: &str = "RUPEETICK_EXCHANGE_RATE";
pub const ENV_API_KEY: &str = "RUPEETICK_ALPHAVANTAGE_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "ALPHAVANTAGE_API_KEY";
pub const ENV_OFFLINE: &str = "RUPEETICK_OFFLINE";
pub const ENV_SEED: &str = "RUPEETICK_SEED";
pub const ENV_TIMEOUT_MS: &str = "RUPEETICK_TIMEOUT_MS";

const DEMO_API_KEY: &str = "demo";

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub exchange_rate: f64,
    pub api_key: String,
    pub offline: bool,
    pub seed: Option<u64>,
    pub timeout_ms: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            exchange_rate: USD_TO_INR_RATE,
            api_key: String::from(DEMO_API_KEY),
            offline: false,
            seed: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl MarketConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_EXCHANGE_RATE) {
            let rate = raw.trim().parse::<f64>().map_err(|e| CoreError::Config {
                key: ENV_EXCHANGE_RATE,
                message: format!("'{raw}' is not a number: {e}"),
            })?;
            CurrencyConverter::with_rate(rate)?;
            config.exchange_rate = rate;
        }

        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK)) {
            config.api_key = key.trim().to_owned();
        }

        if let Some(raw) = get(ENV_OFFLINE) {
            config.offline = parse_flag(&raw).ok_or_else(|| CoreError::Config {
                key: ENV_OFFLINE,
                message: format!("'{raw}' is not a boolean flag"),
            })?;
        }

        if let Some(raw) = get(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|e| CoreError::Config {
                key: ENV_SEED,
                message: format!("'{raw}' is not an unsigned integer: {e}"),
            })?;
            config.seed = Some(seed);
        }

        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            config.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|timeout| *timeout > 0)
                .ok_or_else(|| CoreError::Config {
                    key: ENV_TIMEOUT_MS,
                    message: format!("'{raw}' is not a positive number of milliseconds"),
                })?;
        }

        Ok(config)
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn converter(&self) -> Result<CurrencyConverter, CoreError> {
        Ok(CurrencyConverter::with_rate(self.exchange_rate)?)
    }

    /// Service over the real Alpha Vantage API (or offline).
    pub fn build_service(&self) -> Result<MarketDataService, CoreError> {
        self.build_service_with_client(Arc::new(ReqwestHttpClient::new()))
    }

    pub fn build_service_with_client(
        &self,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<MarketDataService, CoreError> {
        let converter = self.converter()?;
        let generator = SeriesGenerator::new(converter);

        let service = if self.offline {
            MarketDataService::offline(generator)
        } else {
            let source = AlphaVantageSource::new(http_client, self.api_key.clone())
                .with_converter(converter)
                .with_timeout_ms(self.timeout_ms);
            MarketDataService::new(Arc::new(source), generator)
        };

        Ok(match self.seed {
            Some(seed) => service.with_seed(seed),
            None => service,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::ValidationError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = MarketConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.exchange_rate, 83.25);
        assert_eq!(config.api_key, "demo");
    }

    #[test]
    fn reads_every_variable() {
        let config = MarketConfig::from_lookup(lookup(&[
            (ENV_EXCHANGE_RATE, "84.1"),
            (ENV_API_KEY, "primary"),
            (ENV_API_KEY_FALLBACK, "fallback"),
            (ENV_OFFLINE, "TRUE"),
            (ENV_SEED, "42"),
            (ENV_TIMEOUT_MS, "1500"),
        ]))
        .expect("valid config");

        assert_eq!(config.exchange_rate, 84.1);
        assert_eq!(config.api_key, "primary");
        assert!(config.offline);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timeout_ms, 1_500);
    }

    #[test]
    fn falls_back_to_unprefixed_api_key() {
        let config = MarketConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "  "),
            (ENV_API_KEY_FALLBACK, "shared"),
        ]))
        .expect("valid config");
        assert_eq!(config.api_key, "shared");
    }

    #[test]
    fn rejects_bad_values() {
        let err = MarketConfig::from_lookup(lookup(&[(ENV_EXCHANGE_RATE, "-1")]))
            .expect_err("negative rate");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidExchangeRate { .. })
        ));

        let err = MarketConfig::from_lookup(lookup(&[(ENV_EXCHANGE_RATE, "abc")]))
            .expect_err("not a number");
        assert!(matches!(err, CoreError::Config { key: ENV_EXCHANGE_RATE, .. }));

        assert!(MarketConfig::from_lookup(lookup(&[(ENV_OFFLINE, "maybe")])).is_err());
        assert!(MarketConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "0")])).is_err());
        assert!(MarketConfig::from_lookup(lookup(&[(ENV_SEED, "-3")])).is_err());
    }

    #[test]
    fn overrides_only_replace_when_given() {
        let config = MarketConfig {
            seed: Some(1),
            ..MarketConfig::default()
        }
        .with_seed(None)
        .with_offline(true);
        assert_eq!(config.seed, Some(1));
        assert!(config.offline);

        let service = config.build_service().expect("offline service builds");
        assert!(service.is_offline());
    }
}
