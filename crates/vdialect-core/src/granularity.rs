//! Temporal granularities and interval units requested by the query layer

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Truncation/extraction unit for a temporal expression
///
/// Closed set. Tokens are the portable kebab-case spellings
/// (`minute-of-hour`, `day-of-week`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// No-op
    Default,
    Minute,
    MinuteOfHour,
    Hour,
    HourOfDay,
    Day,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    Week,
    WeekOfYear,
    Month,
    MonthOfYear,
    Quarter,
    QuarterOfYear,
    Year,
}

impl Granularity {
    /// Every member of the set, in declaration order
    pub const ALL: [Granularity; 16] = [
        Self::Default,
        Self::Minute,
        Self::MinuteOfHour,
        Self::Hour,
        Self::HourOfDay,
        Self::Day,
        Self::DayOfWeek,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::Week,
        Self::WeekOfYear,
        Self::Month,
        Self::MonthOfYear,
        Self::Quarter,
        Self::QuarterOfYear,
        Self::Year,
    ];

    /// Portable token for this granularity
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Minute => "minute",
            Self::MinuteOfHour => "minute-of-hour",
            Self::Hour => "hour",
            Self::HourOfDay => "hour-of-day",
            Self::Day => "day",
            Self::DayOfWeek => "day-of-week",
            Self::DayOfMonth => "day-of-month",
            Self::DayOfYear => "day-of-year",
            Self::Week => "week",
            Self::WeekOfYear => "week-of-year",
            Self::Month => "month",
            Self::MonthOfYear => "month-of-year",
            Self::Quarter => "quarter",
            Self::QuarterOfYear => "quarter-of-year",
            Self::Year => "year",
        }
    }

    /// Whether the result is a number extracted from a timestamp rather
    /// than a truncated timestamp
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::MinuteOfHour
                | Self::HourOfDay
                | Self::DayOfWeek
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::WeekOfYear
                | Self::MonthOfYear
                | Self::QuarterOfYear
                | Self::Year
        )
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownGranularity(s.to_string()))
    }
}

/// Unit of an interval added to the current timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl IntervalUnit {
    pub const ALL: [IntervalUnit; 8] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalUnit {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownIntervalUnit(s.to_string()))
    }
}
