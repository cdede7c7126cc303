use thiserror::Error;

/// Validation and contract errors exposed by `rupeetick-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid granularity '{value}', expected one of daily, weekly, monthly, yearly")]
    InvalidGranularity { value: String },
    #[error("invalid metric '{value}', expected one of price, volume, market_cap, revenue, profit, employees")]
    InvalidMetric { value: String },

    #[error("date must be formatted as yyyy-MM-dd: '{value}'")]
    InvalidDate { value: String },

    #[error("exchange rate must be a finite positive number, got {value}")]
    InvalidExchangeRate { value: f64 },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("trace_id must be 32 hex characters")]
    InvalidTraceId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration error: {key}: {message}")]
    Config { key: &'static str, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
