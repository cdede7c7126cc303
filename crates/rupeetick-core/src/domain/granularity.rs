use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Time bucket selected on the dashboard; drives both the date step and the
/// number of points in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Number of points in one series.
    pub const fn periods(self) -> usize {
        match self {
            Self::Daily => 30,
            Self::Weekly => 12,
            Self::Monthly => 12,
            Self::Yearly => 5,
        }
    }

    /// Width of the per-point random band; coarser buckets swing harder.
    pub const fn volatility(self) -> f64 {
        match self {
            Self::Daily => 0.03,
            Self::Weekly => 0.06,
            Self::Monthly => 0.12,
            Self::Yearly => 0.20,
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "1d" => Ok(Self::Daily),
            "weekly" | "1w" => Ok(Self::Weekly),
            "monthly" | "1mo" => Ok(Self::Monthly),
            "yearly" | "1y" => Ok(Self::Yearly),
            other => Err(ValidationError::InvalidGranularity {
                value: other.to_owned(),
            }),
        }
    }
}
