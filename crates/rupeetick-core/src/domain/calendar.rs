use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::{Granularity, ValidationError};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date rendered as `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(Date);

impl IsoDate {
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }

    /// Walks `steps` buckets back from this date.
    ///
    /// Month and year steps keep the day of month where possible and clamp to
    /// the last day otherwise (31 Mar minus one month is 28/29 Feb).
    pub fn step_back(self, granularity: Granularity, steps: u32) -> Self {
        let steps = i64::from(steps);
        match granularity {
            Granularity::Daily => Self(self.0.saturating_sub(Duration::days(steps))),
            Granularity::Weekly => Self(self.0.saturating_sub(Duration::weeks(steps))),
            Granularity::Monthly => Self(shift_months_back(self.0, steps)),
            Granularity::Yearly => Self(shift_months_back(self.0, steps * 12)),
        }
    }
}

fn shift_months_back(date: Date, months: i64) -> Date {
    let index = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1 - months;
    let Ok(year) = i32::try_from(index.div_euclid(12)) else {
        return Date::MIN;
    };
    // rem_euclid(12) is always in 0..12
    let month_number = index.rem_euclid(12) as u8 + 1;
    let Ok(month) = Month::try_from(month_number) else {
        return Date::MIN;
    };

    // Days past the end of the target month clamp to its last day.
    let day = date.day();
    Date::from_calendar_date(year, month, day)
        .ok()
        .or_else(|| {
            (28..day)
                .rev()
                .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        })
        .unwrap_or(Date::MIN)
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl From<Date> for IsoDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
