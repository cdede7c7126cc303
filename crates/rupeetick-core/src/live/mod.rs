//! Live market-data sources.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`LiveSeriesSource`] | Async contract the service calls before falling back |
//! | [`AlphaVantageSource`] | `TIME_SERIES_DAILY` adapter guarded by a circuit breaker and throttle |
//! | [`FetchError`] | Structured failure, always recovered by the service |

mod alphavantage;
mod throttle;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::{Granularity, Series};

pub use alphavantage::{AlphaVantageSource, ALPHAVANTAGE_BASE_URL};
pub use throttle::{QuotaPolicy, RequestThrottle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Transport failure or non-2xx status.
    NetworkFailure,
    /// Body is not the expected shape, or a field does not parse.
    MalformedResponse,
    /// Local or upstream request budget exhausted.
    RateLimited,
    /// Circuit breaker is open.
    Unavailable,
}

impl FetchErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkFailure => "network_failure",
            Self::MalformedResponse => "malformed_response",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Live fetch failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NetworkFailure,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::MalformedResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        self.kind.as_str()
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message)
    }
}

impl std::error::Error for FetchError {}

/// Source of real observations for a symbol.
pub trait LiveSeriesSource: Send + Sync {
    /// Short provider name used in logs and notices.
    fn name(&self) -> &'static str;

    /// Fetches at most `granularity.periods()` points, oldest first.
    fn fetch_series<'a>(
        &'a self,
        symbol: &'a str,
        granularity: Granularity,
    ) -> Pin<Box<dyn Future<Output = Result<Series, FetchError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(FetchError::network("x").code(), "network_failure");
        assert_eq!(FetchError::malformed("x").code(), "malformed_response");
        assert_eq!(FetchError::rate_limited("x").code(), "rate_limited");
        assert_eq!(FetchError::unavailable("x").code(), "unavailable");
    }

    #[test]
    fn only_malformed_responses_are_final() {
        assert!(FetchError::network("timeout").retryable());
        assert!(!FetchError::malformed("bad json").retryable());
        assert_eq!(
            FetchError::unavailable("breaker open").to_string(),
            "unavailable: breaker open"
        );
    }
}
