use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Granularity, IsoDate, ValidationError};

/// One observation of a company's metrics, monetary fields already in INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: IsoDate,
    pub price: f64,
    pub volume: u64,
    pub market_cap: f64,
    pub revenue: f64,
    pub profit: f64,
    pub employees: u32,
}

impl DataPoint {
    /// Builds a point from externally sourced figures, rejecting NaN and
    /// infinities that a lenient upstream parser may let through.
    pub fn new(
        date: IsoDate,
        price: f64,
        volume: u64,
        market_cap: f64,
        revenue: f64,
        profit: f64,
        employees: u32,
    ) -> Result<Self, ValidationError> {
        validate_finite("price", price)?;
        validate_finite("market_cap", market_cap)?;
        validate_finite("revenue", revenue)?;
        validate_finite("profit", profit)?;

        Ok(Self {
            date,
            price,
            volume,
            market_cap,
            revenue,
            profit,
            employees,
        })
    }
}

/// Where the points of a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrigin {
    Live,
    Simulated,
}

impl SeriesOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Simulated => "simulated",
        }
    }
}

impl Display for SeriesOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chronologically ordered points for one symbol and granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub symbol: String,
    pub granularity: Granularity,
    pub origin: SeriesOrigin,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(
        symbol: impl Into<String>,
        granularity: Granularity,
        origin: SeriesOrigin,
        points: Vec<DataPoint>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            granularity,
            origin,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    /// True when every date is strictly later than the one before it.
    pub fn is_chronological(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date)
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
