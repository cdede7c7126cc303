use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::{SeriesOrigin, ValidationError};

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard response envelope for all `rupeetick` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps `data`, re-checking `meta` in case fields were edited after
    /// construction.
    pub fn new(meta: EnvelopeMeta, data: T) -> Result<Self, ValidationError> {
        meta.validate()?;
        Ok(Self { meta, data })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub schema_version: String,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    /// Where the series data came from, for commands that return one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SeriesOrigin>,
    pub exchange_rate: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        exchange_rate: f64,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            trace_id: None,
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: now_rfc3339(),
            origin: None,
            exchange_rate: format!("{exchange_rate}"),
            latency_ms,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Result<Self, ValidationError> {
        let trace_id = trace_id.into();
        if !is_valid_trace_id(&trace_id) {
            return Err(ValidationError::InvalidTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    pub fn with_origin(mut self, origin: SeriesOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if let Some(trace_id) = &self.trace_id {
            if !is_valid_trace_id(trace_id) {
                return Err(ValidationError::InvalidTraceId);
            }
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts = version.split('.').collect::<Vec<_>>();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

fn is_valid_trace_id(value: &str) -> bool {
    value.len() == 32
        && value.chars().all(|ch| ch.is_ascii_hexdigit())
        && value.chars().any(|ch| ch != '0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_meta_with_defaults() {
        let meta = EnvelopeMeta::new("request-12345", 83.25, 4).expect("meta should be valid");
        assert_eq!(meta.schema_version, "v1.0.0");
        assert_eq!(meta.exchange_rate, "83.25");
        assert!(meta.generated_at.ends_with('Z'));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("short", 83.25, 0).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_bad_schema_version() {
        let mut meta = EnvelopeMeta::new("request-12345", 83.25, 0).expect("valid");
        meta.schema_version = String::from("1.0");
        assert!(matches!(
            meta.validate(),
            Err(ValidationError::InvalidSchemaVersion { .. })
        ));
    }

    #[test]
    fn trace_id_must_be_non_zero_hex() {
        let meta = EnvelopeMeta::new("request-12345", 83.25, 0).expect("valid");
        assert!(meta.clone().with_trace_id("0".repeat(32)).is_err());
        assert!(meta.clone().with_trace_id("not-a-trace").is_err());
        assert!(meta.with_trace_id("4bf92f3577b34da6a3ce929d0e0e4736").is_ok());
    }

    #[test]
    fn origin_and_warnings_serialize_when_present() {
        let mut meta = EnvelopeMeta::new("request-12345", 83.25, 0)
            .expect("valid")
            .with_origin(SeriesOrigin::Simulated);
        meta.push_warning("live data unavailable");

        let envelope = Envelope::new(meta, 1).expect("valid envelope");
        let json = serde_json::to_value(envelope).expect("serializes");
        assert_eq!(json["meta"]["origin"], "simulated");
        assert_eq!(json["meta"]["warnings"][0], "live data unavailable");
        assert_eq!(json["data"], 1);
    }

    #[test]
    fn envelope_rechecks_edited_meta() {
        let mut meta = EnvelopeMeta::new("request-12345", 83.25, 0).expect("valid");
        meta.request_id = String::from("x");
        assert_eq!(
            Envelope::new(meta, ()).expect_err("must fail"),
            ValidationError::InvalidRequestId
        );
    }
}
